use serde_json::json;

use crate::common::{TestApp, routes};

mod read {
    use super::*;

    #[tokio::test]
    async fn users_can_read_their_own_profile() {
        let app = TestApp::spawn().await;
        let (user_id, key) = app.register_user().await;

        let res = app.get(&routes::user(user_id), &key).await;

        assert_eq!(res.status, 200, "Get failed: {}", res.text);
        assert_eq!(res.body["email"], "user@example.com");
        assert_eq!(res.body["role"], "standard");
        // The password hash never leaves the server.
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn users_cannot_read_other_profiles_but_admins_can() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;
        let (user_id, _) = app.register_user().await;
        let (_, other_key) = app.register("other@example.com", "standard").await;

        let res = app.get(&routes::user(user_id), &other_key).await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app.get(&routes::user(user_id), &admin_key).await;
        assert_eq!(res.status, 200);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn users_can_update_their_own_measurements() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (user_id, key) = app.register_user().await;

        let res = app
            .patch(
                &routes::user(user_id),
                &json!({"height": 175.0, "weight": 70.0}),
                &key,
            )
            .await;

        assert_eq!(res.status, 200, "Patch failed: {}", res.text);
        assert_eq!(res.body["height"].as_f64().unwrap(), 175.0);
        assert_eq!(res.body["weight"].as_f64().unwrap(), 70.0);
    }

    #[tokio::test]
    async fn only_admins_can_change_roles() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;
        let (user_id, user_key) = app.register_user().await;

        let res = app
            .patch(&routes::user(user_id), &json!({"role": "admin"}), &user_key)
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app
            .patch(&routes::user(user_id), &json!({"role": "admin"}), &admin_key)
            .await;
        assert_eq!(res.status, 200, "Promotion failed: {}", res.text);
        assert_eq!(res.body["role"], "admin");

        // The promoted user's existing key now carries admin rights.
        let res = app
            .post(
                routes::WORKOUTS,
                &json!({
                    "name": "Admin Workout",
                    "duration": 600.0,
                    "intensity": "mild",
                    "equipment": "none",
                    "kind": "cardio",
                }),
                &user_key,
            )
            .await;
        assert_eq!(res.status, 201, "Create after promotion failed: {}", res.text);
    }

    #[tokio::test]
    async fn changing_email_to_a_taken_one_conflicts() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, _) = app.register_admin().await;
        let (user_id, key) = app.register_user().await;

        let res = app
            .patch(
                &routes::user(user_id),
                &json!({"email": "admin@example.com"}),
                &key,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleting_a_user_removes_their_plans_and_playlists() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;
        let (user_id, user_key) = app.register_user().await;

        let w1 = app.seed_workout(&admin_key, "Squats", 10.0, "intermediate").await;
        app.seed_song(&admin_key, "Riff", "Rock", 30.0).await;
        let res = app
            .post(
                routes::WORKOUT_PLANS,
                &json!({"plan_name": "Doomed Plan", "workout_ids": [w1]}),
                &user_key,
            )
            .await;
        assert_eq!(res.status, 201);
        let plan_id = res.body["workout_plan_id"].as_i64().unwrap();
        let playlist_id = res.body["playlist_id"].as_i64().unwrap();

        let res = app.delete(&routes::user(user_id), &admin_key).await;
        assert_eq!(res.status, 204, "Delete failed: {}", res.text);

        // The deleted user's key no longer authenticates.
        let res = app.get(routes::WORKOUTS, &user_key).await;
        assert_eq!(res.status, 401);

        let res = app.get(&routes::workout_plan(plan_id), &admin_key).await;
        assert_eq!(res.status, 404);
        let res = app.get(&routes::playlist(playlist_id), &admin_key).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn standard_users_cannot_delete_accounts() {
        let app = TestApp::spawn().await;
        let (user_id, key) = app.register_user().await;

        let res = app.delete(&routes::user(user_id), &key).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
