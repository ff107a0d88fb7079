use std::env;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use tweet_likes::models::{Labels, PostId};
use tweet_likes::{Config, HttpLikeClient, LikeToggleController, PageState, load_page};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let page = load_page(&config.page_path).await?;

    let mut client = HttpLikeClient::new(&config.base_url, page.csrf_token.clone());
    if let Some(cookie) = &config.cookie {
        client = client.with_cookie(cookie);
    }

    let state = PageState::bind(page.controls, page.counters, Labels::default());
    let controller = LikeToggleController::new(state, client, config.controller_options());

    let clicks: Vec<_> = env::args()
        .skip(1)
        .map(|post_id| controller.spawn_click(PostId::from(post_id)))
        .collect();
    if clicks.is_empty() {
        warn!("no post ids given, nothing to toggle");
    }

    for click in clicks {
        if let Ok(outcome) = click.await? {
            info!(?outcome, "click settled");
        }
    }

    let snapshot = controller.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
