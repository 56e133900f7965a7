use sea_orm::*;
use tracing::warn;

use crate::entity::{playlist, playlist_item, song, workout};
use crate::error::AppError;
use crate::policy::Intensity;

/// Result of one playlist assembly run.
pub struct AssemblyOutcome {
    pub playlist_id: i32,
    pub total_duration: f64,
    pub song_count: usize,
    /// Workout ids that contributed nothing: unknown ids, or rows whose
    /// stored intensity no longer parses. Reported for observability
    /// instead of being swallowed.
    pub skipped_workout_ids: Vec<i32>,
}

/// Assemble one playlist for an ordered list of workout ids.
///
/// Per workout: map its intensity to the acceptable genres, fetch matching
/// songs in id order, and greedily accumulate them until the workout's
/// duration is covered (the crossing song is kept whole; under-fill is
/// accepted when the candidates run out). Selections from all workouts are
/// appended to a single playlist; the same song may appear once per workout
/// that selected it.
///
/// Missing workouts are skipped, not errors — partial input must not abort
/// the whole run. Callers that need stricter semantics check the ids
/// themselves (plan creation does, and fails the transaction instead).
///
/// Writes one `playlist` row and one `playlist_item` row per selected song
/// on the given connection; run inside a transaction to make the batch
/// atomic. An empty `workout_ids` list yields an empty playlist with
/// duration 0.
pub async fn assemble<C: ConnectionTrait>(
    conn: &C,
    playlist_name: &str,
    workout_ids: &[i32],
) -> Result<AssemblyOutcome, AppError> {
    let mut selected: Vec<i32> = Vec::new();
    let mut grand_total = 0.0_f64;
    let mut skipped: Vec<i32> = Vec::new();

    for &workout_id in workout_ids {
        let Some(workout) = workout::Entity::find_by_id(workout_id).one(conn).await? else {
            warn!("Skipping unknown workout {} during playlist assembly", workout_id);
            skipped.push(workout_id);
            continue;
        };

        let intensity = match workout.intensity.parse::<Intensity>() {
            Ok(intensity) => intensity,
            Err(e) => {
                warn!("Skipping workout {}: {}", workout_id, e);
                skipped.push(workout_id);
                continue;
            }
        };

        let candidates: Vec<(i32, f64)> = song::Entity::find()
            .filter(song::Column::Genre.is_in(intensity.genres().iter().copied()))
            .order_by_asc(song::Column::Id)
            .select_only()
            .column(song::Column::Id)
            .column(song::Column::Duration)
            .into_tuple()
            .all(conn)
            .await?;

        let (picked, sub_total) = fill_to_duration(workout.duration, &candidates);
        selected.extend(picked);
        grand_total += sub_total;
    }

    let new_playlist = playlist::ActiveModel {
        name: Set(playlist_name.to_string()),
        total_duration: Set(grand_total),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_playlist.insert(conn).await?;

    for (i, &song_id) in selected.iter().enumerate() {
        let item = playlist_item::ActiveModel {
            playlist_id: Set(model.id),
            song_id: Set(song_id),
            position: Set(i32::try_from(i)
                .map_err(|_| AppError::Validation("Too many songs in playlist".into()))?),
            ..Default::default()
        };
        item.insert(conn).await?;
    }

    Ok(AssemblyOutcome {
        playlist_id: model.id,
        total_duration: grand_total,
        song_count: selected.len(),
        skipped_workout_ids: skipped,
    })
}

/// Greedy duration fill over `(song_id, duration)` candidates in order:
/// accumulate until the running total reaches `target`, keeping the
/// crossing song whole. Exhausting the candidates before the target is
/// reached is not an error.
fn fill_to_duration(target: f64, candidates: &[(i32, f64)]) -> (Vec<i32>, f64) {
    let mut picked = Vec::new();
    let mut total = 0.0_f64;

    for &(song_id, duration) in candidates {
        picked.push(song_id);
        total += duration;
        if total >= target {
            break;
        }
    }

    (picked, total)
}
