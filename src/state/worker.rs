use crate::state::messages::{SessionRequest, SessionResponse};
use log::{debug, error};
use swehockey_api::{ApiResult, GameSession, GameSource, Refresh};
use tokio::sync::mpsc;

/// Owns the game session. Requests are handled one at a time, so loads and
/// refreshes never interleave.
pub struct SessionWorker<S> {
    session: GameSession<S>,
    requests: mpsc::Receiver<SessionRequest>,
    responses: mpsc::Sender<SessionResponse>,
}

impl<S: GameSource> SessionWorker<S> {
    pub fn new(
        source: S,
        requests: mpsc::Receiver<SessionRequest>,
        responses: mpsc::Sender<SessionResponse>,
    ) -> Self {
        Self {
            session: GameSession::new(source),
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = match request {
                SessionRequest::Load { game_id } => self.handle_load(game_id).await,
                SessionRequest::Refresh { target } => self.handle_refresh(target).await,
            };

            debug!("session request complete");

            let response = result.unwrap_or_else(|err| SessionResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send session response: {e}");
                break;
            }
        }
    }

    async fn handle_load(&mut self, game_id: u64) -> ApiResult<SessionResponse> {
        debug!("loading game {game_id}");
        let game = self.session.load(game_id).await?;
        Ok(SessionResponse::GameLoaded { game })
    }

    async fn handle_refresh(&mut self, target: Refresh) -> ApiResult<SessionResponse> {
        debug!("refreshing {target}");
        let game = self.session.refresh(target).await?;
        Ok(SessionResponse::GameRefreshed { target, game })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use swehockey_api::{ApiError, DocumentKind, RawDocument};

    #[derive(Default)]
    struct FixtureSource {
        summary_down: AtomicBool,
    }

    impl GameSource for FixtureSource {
        async fn fetch(&self, kind: DocumentKind, _game_id: u64) -> ApiResult<RawDocument> {
            Ok(match kind {
                DocumentKind::LineUps => RawDocument::LineUps(
                    serde_json::from_str(include_str!("../../api/tests/fixtures/lineups.json")).unwrap(),
                ),
                DocumentKind::Summary if self.summary_down.load(Ordering::SeqCst) => {
                    return Err(ApiError::Other("summary unavailable".into()));
                }
                DocumentKind::Summary => RawDocument::Summary(
                    serde_json::from_str(include_str!("../../api/tests/fixtures/summary.json")).unwrap(),
                ),
                DocumentKind::Actions => RawDocument::Actions(
                    serde_json::from_str(include_str!("../../api/tests/fixtures/actions.json")).unwrap(),
                ),
            })
        }
    }

    fn spawn_worker(
        source: FixtureSource,
    ) -> (mpsc::Sender<SessionRequest>, mpsc::Receiver<SessionResponse>) {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, resp_rx) = mpsc::channel(8);
        tokio::spawn(SessionWorker::new(source, req_rx, resp_tx).run());
        (req_tx, resp_rx)
    }

    #[tokio::test]
    async fn refresh_before_load_reports_an_error() {
        let (requests, mut responses) = spawn_worker(FixtureSource::default());
        requests
            .send(SessionRequest::Refresh { target: Refresh::Actions })
            .await
            .unwrap();
        match responses.recv().await {
            Some(SessionResponse::Error { message }) => assert!(message.contains("No game loaded")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_then_refresh_answers_in_order() {
        let (requests, mut responses) = spawn_worker(FixtureSource::default());
        requests.send(SessionRequest::Load { game_id: 862422 }).await.unwrap();
        requests
            .send(SessionRequest::Refresh { target: Refresh::Actions })
            .await
            .unwrap();

        let Some(SessionResponse::GameLoaded { game: loaded }) = responses.recv().await else {
            panic!("load should answer first");
        };
        let Some(SessionResponse::GameRefreshed { target, game }) = responses.recv().await else {
            panic!("refresh should answer second");
        };
        assert_eq!(target, Refresh::Actions);
        assert_eq!(*game, *loaded);
    }

    #[tokio::test]
    async fn failed_refresh_is_reported_and_worker_keeps_going() {
        let source = FixtureSource::default();
        source.summary_down.store(true, Ordering::SeqCst);
        let (requests, mut responses) = spawn_worker(source);

        requests.send(SessionRequest::Load { game_id: 862422 }).await.unwrap();
        assert!(matches!(responses.recv().await, Some(SessionResponse::Error { .. })));

        requests
            .send(SessionRequest::Refresh { target: Refresh::Summary })
            .await
            .unwrap();
        assert!(matches!(responses.recv().await, Some(SessionResponse::Error { .. })));
    }
}
