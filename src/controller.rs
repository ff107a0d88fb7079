use crate::client::LikeEndpoint;
use crate::errors::ToggleError;
use crate::models::{LikeAction, PostId, PostView};
use crate::state::PageState;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    /// Drop clicks on a control whose previous request is still pending.
    /// Off by default: every click sends its own request and responses apply
    /// in arrival order against whatever is displayed at that moment.
    pub ignore_pending_clicks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Applied(PostView),
    /// The control already had a request in flight and pending clicks are
    /// being ignored.
    Ignored,
}

pub struct LikeToggleController<E> {
    state: Arc<Mutex<PageState>>,
    endpoint: Arc<E>,
    options: ControllerOptions,
}

impl<E> Clone for LikeToggleController<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            endpoint: Arc::clone(&self.endpoint),
            options: self.options,
        }
    }
}

impl<E> LikeToggleController<E>
where
    E: LikeEndpoint + 'static,
{
    pub fn new(state: PageState, endpoint: E, options: ControllerOptions) -> Self {
        info!(posts = state.len(), "like controls bound");
        Self {
            state: Arc::new(Mutex::new(state)),
            endpoint: Arc::new(endpoint),
            options,
        }
    }

    /// Handles one click on the control for `post_id`. Failures are logged
    /// here and leave the page untouched.
    pub async fn click(&self, post_id: &PostId) -> Result<ClickOutcome, ToggleError> {
        let result = self.toggle(post_id).await;
        if let Err(err) = &result {
            error!(post_id = %post_id, "like toggle failed: {err}");
        }
        result
    }

    pub fn spawn_click(&self, post_id: PostId) -> JoinHandle<Result<ClickOutcome, ToggleError>> {
        let controller = self.clone();
        tokio::spawn(async move { controller.click(&post_id).await })
    }

    pub async fn snapshot(&self) -> Vec<PostView> {
        self.state.lock().await.snapshot()
    }

    async fn toggle(&self, post_id: &PostId) -> Result<ClickOutcome, ToggleError> {
        let action = {
            let mut state = self.state.lock().await;
            let entry = state.get_mut(post_id)?;
            if entry.in_flight && self.options.ignore_pending_clicks {
                debug!(post_id = %post_id, "request already in flight, ignoring click");
                return Ok(ClickOutcome::Ignored);
            }
            entry.in_flight = true;
            LikeAction::for_state(entry.control.is_liked)
        };

        let sent = self.endpoint.send(post_id, action).await;

        let mut state = self.state.lock().await;
        state.get_mut(post_id)?.in_flight = false;
        sent?;

        let view = state.apply_success(post_id, action)?;
        info!(post_id = %post_id, %action, count = %view.count, "like toggled");
        Ok(ClickOutcome::Applied(view))
    }
}
