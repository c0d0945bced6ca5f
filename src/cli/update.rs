use std::path::PathBuf;

use chrono::Utc;

use crate::{
    Res,
    config::Settings,
    info,
    management::CredentialStore,
    render::{self, Report},
    spotify, success,
};

/// Runs one full update: token, stats, render, write.
///
/// Failures up to and including the read calls are logged and tolerated.
/// The run only fails when the HTTP client cannot be built, when the
/// collected stats are incomplete, or when the output cannot be written.
/// Returns the path of the written document.
pub async fn update(settings: &Settings) -> Res<PathBuf> {
    let client = spotify::build_client(settings)?;
    let store = CredentialStore::new(settings.cache_file.clone());

    let token = spotify::auth::get_token(&client, settings, &store).await;
    let stats = spotify::stats::collect_stats(&client, settings, token.as_deref()).await;

    let report = Report::try_from(stats)?;
    info!(
        "Top track: {} by {}, genres: {} / {}",
        report.top_track.song_name,
        report.top_track.artist_name,
        report.long_term_genre,
        report.recent_genre
    );

    let content = render::render(&report, &settings.profile_url, Utc::now());
    render::write_document(&settings.output_file, &content).await?;

    success!("Wrote {}", settings.output_file.display());
    Ok(settings.output_file.clone())
}
