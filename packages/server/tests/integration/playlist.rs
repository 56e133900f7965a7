use serde_json::json;

use crate::common::{TestApp, routes};

mod generate {
    use super::*;

    #[tokio::test]
    async fn picks_the_minimal_prefix_of_matching_songs() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Stretch", 30.0, "slow").await;
        // Insertion order pins the candidate order (store returns id order).
        let first = app.seed_song(&admin_key, "Aria", "Classical", 10.0).await;
        let second = app.seed_song(&admin_key, "Nocturne", "Jazz", 15.0).await;
        let third = app.seed_song(&admin_key, "Drift", "Ambient", 20.0).await;
        // Non-matching genre must never be selected.
        app.seed_song(&admin_key, "Thrash", "Metal", 5.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Stretch Mix", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201, "Generation failed: {}", res.text);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 3);
        // 10 + 15 < 30, the crossing song is kept whole: 10 + 15 + 20 = 45.
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 45.0);
        assert_eq!(res.body["skipped_workout_ids"].as_array().unwrap().len(), 0);

        let playlist_id = res.body["playlist_id"].as_i64().unwrap();
        let res = app.get(&routes::playlist(playlist_id), &admin_key).await;
        assert_eq!(res.status, 200);
        let songs = res.body["songs"].as_array().unwrap();
        let ids: Vec<i64> = songs.iter().map(|s| s["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[tokio::test]
    async fn under_fill_takes_every_matching_song() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Long Ride", 1000.0, "fast").await;
        app.seed_song(&admin_key, "Pulse", "Techno", 120.0).await;
        app.seed_song(&admin_key, "Strobe", "House", 90.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Ride Mix", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 2);
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 210.0);
    }

    #[tokio::test]
    async fn a_workout_with_no_matching_songs_contributes_nothing() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Deadlifts", 600.0, "extreme").await;
        // Catalog holds nothing in Metal/Hardcore/Dubstep.
        app.seed_song(&admin_key, "Aria", "Classical", 180.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Lift Mix", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201, "Generation failed: {}", res.text);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 0);
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 0.0);
        // The workout itself exists, so it is not reported as skipped.
        assert_eq!(res.body["skipped_workout_ids"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn an_empty_workout_list_yields_an_empty_playlist() {
        let app = TestApp::spawn().await;
        let (_, user_key) = app.register_user().await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Empty Mix", "workout_ids": []}),
                &user_key,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 0);
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 0.0);

        let playlist_id = res.body["playlist_id"].as_i64().unwrap();
        let res = app.get(&routes::playlist(playlist_id), &user_key).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["songs"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unknown_workout_ids_are_skipped_and_reported() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Jog", 100.0, "mild").await;
        app.seed_song(&admin_key, "Sunny", "Pop", 150.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Jog Mix", "workout_ids": [workout_id, 9999]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201, "Generation failed: {}", res.text);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 1);
        assert_eq!(
            res.body["skipped_workout_ids"].as_array().unwrap(),
            &vec![json!(9999)]
        );
    }

    #[tokio::test]
    async fn the_same_song_can_serve_two_workouts() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let first = app.seed_workout(&admin_key, "Warmup", 60.0, "mild").await;
        let second = app.seed_workout(&admin_key, "Cooldown", 60.0, "mild").await;
        let song_id = app.seed_song(&admin_key, "Sunny", "Pop", 90.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Loop Mix", "workout_ids": [first, second]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["song_count"].as_u64().unwrap(), 2);
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 180.0);

        let playlist_id = res.body["playlist_id"].as_i64().unwrap();
        let res = app.get(&routes::playlist(playlist_id), &admin_key).await;
        let songs = res.body["songs"].as_array().unwrap();
        assert_eq!(songs.len(), 2);
        assert!(songs.iter().all(|s| s["id"].as_i64().unwrap() == song_id));
    }

    #[tokio::test]
    async fn a_missing_playlist_name_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let (_, user_key) = app.register_user().await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "   ", "workout_ids": []}),
                &user_key,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod replace_songs {
    use super::*;

    #[tokio::test]
    async fn replacing_contents_reorders_and_recomputes_duration() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Stretch", 30.0, "slow").await;
        let first = app.seed_song(&admin_key, "Aria", "Classical", 10.0).await;
        let second = app.seed_song(&admin_key, "Nocturne", "Jazz", 15.0).await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Stretch Mix", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;
        let playlist_id = res.body["playlist_id"].as_i64().unwrap();

        let res = app
            .put(
                &routes::playlist_songs(playlist_id),
                &json!({"song_ids": [second, first, second]}),
                &admin_key,
            )
            .await;
        assert_eq!(res.status, 204, "Replace failed: {}", res.text);

        let res = app.get(&routes::playlist(playlist_id), &admin_key).await;
        let ids: Vec<i64> = res.body["songs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second, first, second]);
        assert_eq!(res.body["total_duration"].as_f64().unwrap(), 40.0);
    }

    #[tokio::test]
    async fn unknown_song_ids_are_rejected() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Empty Mix", "workout_ids": []}),
                &admin_key,
            )
            .await;
        let playlist_id = res.body["playlist_id"].as_i64().unwrap();

        let res = app
            .put(
                &routes::playlist_songs(playlist_id),
                &json!({"song_ids": [12345]}),
                &admin_key,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn a_standalone_playlist_can_be_deleted() {
        let app = TestApp::spawn_with_cache_ttl(0).await;
        let (_, admin_key) = app.register_admin().await;

        let res = app
            .post(
                routes::GENERATE_PLAYLIST,
                &json!({"playlist_name": "Orphan Mix", "workout_ids": []}),
                &admin_key,
            )
            .await;
        let playlist_id = res.body["playlist_id"].as_i64().unwrap();

        let res = app.delete(&routes::playlist(playlist_id), &admin_key).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::playlist(playlist_id), &admin_key).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn a_playlist_owned_by_a_plan_rejects_direct_deletion() {
        let app = TestApp::spawn().await;
        let (_, admin_key) = app.register_admin().await;

        let workout_id = app.seed_workout(&admin_key, "Jog", 100.0, "mild").await;
        app.seed_song(&admin_key, "Sunny", "Pop", 150.0).await;

        let res = app
            .post(
                routes::WORKOUT_PLANS,
                &json!({"plan_name": "Jog Week", "workout_ids": [workout_id]}),
                &admin_key,
            )
            .await;
        assert_eq!(res.status, 201, "Plan creation failed: {}", res.text);
        let playlist_id = res.body["playlist_id"].as_i64().unwrap();

        let res = app.delete(&routes::playlist(playlist_id), &admin_key).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}
