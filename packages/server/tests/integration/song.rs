use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_can_add_a_song() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let res = app
            .post(
                routes::SONGS,
                &json!({
                    "name": "Clair de Lune",
                    "artist": "Debussy",
                    "genre": "Classical",
                    "duration": 300.0,
                }),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201, "Create failed: {}", res.text);
        assert_eq!(res.body["genre"], "Classical");
    }

    #[tokio::test]
    async fn duplicate_song_names_conflict() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;
        app.seed_song(&admin_key, "Clair de Lune", "Classical", 300.0)
            .await;

        let res = app
            .post(
                routes::SONGS,
                &json!({
                    "name": "Clair de Lune",
                    "artist": "Someone Else",
                    "genre": "Ambient",
                    "duration": 180.0,
                }),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "SONG_EXISTS");
    }

    #[tokio::test]
    async fn standard_users_cannot_add_songs() {
        let app = TestApp::spawn().await;
        let (_, user_key) = app.register_user().await;

        let res = app
            .post(
                routes::SONGS,
                &json!({
                    "name": "Clair de Lune",
                    "artist": "Debussy",
                    "genre": "Classical",
                    "duration": 300.0,
                }),
                &user_key,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn renaming_onto_an_existing_song_conflicts() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;
        app.seed_song(&admin_key, "First", "Pop", 200.0).await;
        let second = app.seed_song(&admin_key, "Second", "Pop", 210.0).await;

        let res = app
            .patch(&routes::song(second), &json!({"name": "First"}), &admin_key)
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "SONG_EXISTS");
    }

    #[tokio::test]
    async fn patch_updates_genre_and_duration() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;
        let id = app.seed_song(&admin_key, "Shifter", "Pop", 200.0).await;

        let res = app
            .patch(
                &routes::song(id),
                &json!({"genre": "Rock", "duration": 250.0}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 200, "Patch failed: {}", res.text);
        assert_eq!(res.body["genre"], "Rock");
        assert_eq!(res.body["duration"].as_f64().unwrap(), 250.0);
        assert_eq!(res.body["name"], "Shifter");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_an_unreferenced_song() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;
        let id = app.seed_song(&admin_key, "Shifter", "Pop", 200.0).await;

        let res = app.delete(&routes::song(id), &admin_key).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::song(id), &admin_key).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_conflicts_when_a_playlist_contains_the_song() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;
        let workout_id = app.seed_workout(&admin_key, "Jog", 100.0, "slow").await;
        let song_id = app
            .seed_song(&admin_key, "Gymnopedie No.1", "Classical", 200.0)
            .await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Jog Mix", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;
        assert_eq!(res.status, 201, "Generation failed: {}", res.text);

        let res = app.delete(&routes::song(song_id), &admin_key).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}
