use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_gets_an_id_and_a_raw_api_key() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_key(
                routes::REGISTER,
                &json!({
                    "email": "alice@example.com",
                    "password": "securepass123",
                    "height": 168.0,
                    "weight": 61.5,
                    "role": "standard",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "Registration failed: {}", res.text);
        assert!(res.body["user_id"].is_number());
        let key = res.body["api_key"].as_str().unwrap();
        assert_eq!(key.len(), 64);
    }

    #[tokio::test]
    async fn cannot_register_the_same_email_twice() {
        let app = TestApp::spawn().await;
        let body = json!({
            "email": "alice@example.com",
            "password": "securepass123",
            "height": 168.0,
            "weight": 61.5,
            "role": "standard",
        });

        let first = app.post_without_key(routes::REGISTER, &body).await;
        assert_eq!(first.status, 201);

        let res = app.post_without_key(routes::REGISTER, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn rejects_short_passwords_and_bad_roles() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_key(
                routes::REGISTER,
                &json!({
                    "email": "bob@example.com",
                    "password": "short",
                    "height": 180.0,
                    "weight": 80.0,
                    "role": "standard",
                }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .post_without_key(
                routes::REGISTER,
                &json!({
                    "email": "bob@example.com",
                    "password": "securepass123",
                    "height": 180.0,
                    "weight": 80.0,
                    "role": "superuser",
                }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_non_positive_measurements() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_key(
                routes::REGISTER,
                &json!({
                    "email": "bob@example.com",
                    "password": "securepass123",
                    "height": -1.0,
                    "weight": 80.0,
                    "role": "standard",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_log_in() {
        let app = TestApp::spawn().await;
        let (user_id, _) = app.register_user().await;

        let res = app
            .post_without_key(
                routes::LOGIN,
                &json!({"email": "user@example.com", "password": "securepass123"}),
            )
            .await;

        assert_eq!(res.status, 200, "Login failed: {}", res.text);
        assert_eq!(res.body["user_id"].as_i64().unwrap(), user_id);
        assert_eq!(res.body["role"], "standard");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let app = TestApp::spawn().await;
        app.register_user().await;

        let res = app
            .post_without_key(
                routes::LOGIN,
                &json!({"email": "user@example.com", "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_key(
                routes::LOGIN,
                &json!({"email": "ghost@example.com", "password": "securepass123"}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod api_keys {
    use super::*;

    #[tokio::test]
    async fn requests_without_a_key_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_key(routes::WORKOUTS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "API_KEY_MISSING");
    }

    #[tokio::test]
    async fn requests_with_a_bogus_key_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::WORKOUTS, "definitely-not-a-key").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "API_KEY_INVALID");
    }

    #[tokio::test]
    async fn rotation_replaces_the_old_key() {
        let app = TestApp::spawn().await;
        let (_, old_key) = app.register_user().await;

        let res = app.put_empty(routes::KEYS, &old_key).await;
        assert_eq!(res.status, 200, "Rotation failed: {}", res.text);
        let new_key = res.body["api_key"].as_str().unwrap().to_string();
        assert_ne!(new_key, old_key);

        let res = app.get(routes::WORKOUTS, &old_key).await;
        assert_eq!(res.status, 401);

        let res = app.get(routes::WORKOUTS, &new_key).await;
        assert_eq!(res.status, 200);
    }
}
