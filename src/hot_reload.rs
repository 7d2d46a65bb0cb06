use std::{path::Path, sync::Arc, time::Duration};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use notify_debouncer_full::{
    new_debouncer, DebouncedEvent,
    notify::{Error as NotifyError, RecursiveMode, Watcher},
};
use tracing::{debug, error, info};

use crate::content_loader::{reload_content, CONTENT_DIR};
use crate::state::{AppState, RefreshBroadcaster};

/// Injected before `</body>` on every page served in development mode.
pub const HOT_RELOAD_SCRIPT: &str = r#"
<script>
    const socket = new WebSocket("ws://" + window.location.host + "/ws");
    socket.onmessage = (event) => {
        if (event.data === "reload") {
            window.location.reload();
        }
    };
</script>
"#;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(tx): State<RefreshBroadcaster>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, tx))
}

async fn handle_socket(mut socket: WebSocket, tx: RefreshBroadcaster) {
    let mut rx = tx.subscribe();

    // One reload per connection; the refreshed page opens a new socket.
    if rx.recv().await.is_ok() {
        if socket.send(Message::Text("reload".to_string().into())).await.is_err() {
            debug!("Client disconnected before reload message could be sent");
        }
    }
}

/// Shells, config, the about page, and static assets are live-editable.
/// Post bodies under `content/posts/` are compiled into the binary, so a
/// change there needs a rebuild regardless; the reload only refreshes what
/// the loader reads. Editor droppings (`.#*`, `*~`) are ignored.
fn is_relevant(path: &Path) -> bool {
    let name = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name,
        None => return false,
    };
    if name.starts_with(".#") || name.ends_with('~') {
        return false;
    }
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("html" | "toml" | "md" | "css" | "js")
    )
}

pub fn start_content_watcher(tx: RefreshBroadcaster, app_state: Arc<AppState>) {
    info!("Starting content watcher for hot-reload...");
    tokio::spawn(async move {
        let (watcher_tx, mut watcher_rx) = tokio::sync::mpsc::channel(1);

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            None,
            move |res: Result<Vec<DebouncedEvent>, Vec<NotifyError>>| match res {
                Ok(events) => {
                    let changed: Vec<_> = events
                        .iter()
                        .filter(|event| {
                            event.kind.is_modify()
                                || event.kind.is_create()
                                || event.kind.is_remove()
                        })
                        .flat_map(|event| &event.event.paths)
                        .filter(|path| is_relevant(path))
                        .collect();

                    if !changed.is_empty() {
                        debug!(
                            "Relevant file change detected: {:?}",
                            changed.iter().map(|p| p.display()).collect::<Vec<_>>()
                        );
                        if let Err(e) = watcher_tx.blocking_send(()) {
                            error!("Failed to send watcher event: {}", e);
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        error!("Watcher error: {}", e);
                    }
                }
            },
        )
        .expect("Failed to create debouncer");

        debouncer
            .watcher()
            .watch(CONTENT_DIR.as_ref(), RecursiveMode::Recursive)
            .expect("Failed to start watching content directory");

        while watcher_rx.recv().await.is_some() {
            info!("Content change detected, reloading content and sending signal...");

            reload_content(&app_state).await;

            if let Err(e) = tx.send(()) {
                error!("Failed to broadcast reload signal: {}", e);
            }
        }
    });
}
