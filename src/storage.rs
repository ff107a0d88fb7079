use crate::errors::PageError;
use crate::markup::parse_page;
use crate::models::Page;
use std::path::Path;
use tokio::fs;
use tracing::info;

pub async fn load_page(path: &Path) -> Result<Page, PageError> {
    let html = fs::read_to_string(path).await?;
    let page = parse_page(&html)?;
    info!(path = %path.display(), controls = page.controls.len(), "loaded page");
    Ok(page)
}
