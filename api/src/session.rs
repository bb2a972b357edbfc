use crate::client::{ApiError, ApiResult, DocumentKind, GameSource, RawDocument};
use crate::convert::build_game;
use crate::swehockey::{ActionsResponse, LineUpsResponse, SummaryResponse};
use crate::UnifiedGame;
use log::debug;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which document(s) a refresh re-fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    LineUps,
    Summary,
    Actions,
    All,
}

impl Refresh {
    /// The single document to re-fetch, or None for a full reload.
    pub fn document(&self) -> Option<DocumentKind> {
        match self {
            Refresh::LineUps => Some(DocumentKind::LineUps),
            Refresh::Summary => Some(DocumentKind::Summary),
            Refresh::Actions => Some(DocumentKind::Actions),
            Refresh::All => None,
        }
    }
}

impl fmt::Display for Refresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.document() {
            Some(kind) => write!(f, "{kind}"),
            None => f.write_str("all"),
        }
    }
}

impl FromStr for Refresh {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lineups" => Ok(Refresh::LineUps),
            "summary" => Ok(Refresh::Summary),
            "events" | "actions" => Ok(Refresh::Actions),
            "all" => Ok(Refresh::All),
            other => Err(ApiError::Other(format!("unknown refresh target {other:?}"))),
        }
    }
}

#[derive(Debug, Clone)]
struct Documents {
    line_ups: LineUpsResponse,
    summary: SummaryResponse,
    actions: ActionsResponse,
}

/// A cached game: the three raw documents and the model built from them.
///
/// Every successful `load`/`refresh` rebuilds the whole model and swaps in the
/// id, documents and model together. A failed fetch leaves all of it as it was.
pub struct GameSession<S> {
    source: S,
    game_id: Option<u64>,
    documents: Option<Documents>,
    model: Option<Arc<UnifiedGame>>,
}

impl<S: GameSource> GameSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            game_id: None,
            documents: None,
            model: None,
        }
    }

    pub fn game_id(&self) -> Option<u64> {
        self.game_id
    }

    /// Last successfully built model, if any.
    pub fn current_model(&self) -> Option<Arc<UnifiedGame>> {
        self.model.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all three documents for `game_id` and build the model.
    pub async fn load(&mut self, game_id: u64) -> ApiResult<Arc<UnifiedGame>> {
        debug!("loading game {game_id}");
        let line_ups = self.fetch_line_ups(game_id).await?;
        let summary = self.fetch_summary(game_id).await?;
        let actions = self.fetch_actions(game_id).await?;
        Ok(self.commit(game_id, Documents { line_ups, summary, actions }))
    }

    /// Re-fetch one document (or all three) and rebuild from the cache.
    pub async fn refresh(&mut self, target: Refresh) -> ApiResult<Arc<UnifiedGame>> {
        let (Some(game_id), Some(mut documents)) = (self.game_id, self.documents.clone()) else {
            return Err(ApiError::NoSession);
        };
        debug!("refreshing {target} for game {game_id}");

        match target {
            Refresh::All => return self.load(game_id).await,
            Refresh::LineUps => documents.line_ups = self.fetch_line_ups(game_id).await?,
            Refresh::Summary => documents.summary = self.fetch_summary(game_id).await?,
            Refresh::Actions => documents.actions = self.fetch_actions(game_id).await?,
        }
        Ok(self.commit(game_id, documents))
    }

    fn commit(&mut self, game_id: u64, documents: Documents) -> Arc<UnifiedGame> {
        let model = Arc::new(build_game(
            &documents.line_ups,
            &documents.summary,
            &documents.actions,
        ));
        self.game_id = Some(game_id);
        self.documents = Some(documents);
        self.model = Some(Arc::clone(&model));
        model
    }

    async fn fetch_line_ups(&self, game_id: u64) -> ApiResult<LineUpsResponse> {
        match self.fetch(DocumentKind::LineUps, game_id).await? {
            RawDocument::LineUps(doc) => Ok(doc),
            other => Err(wrong_kind(DocumentKind::LineUps, &other)),
        }
    }

    async fn fetch_summary(&self, game_id: u64) -> ApiResult<SummaryResponse> {
        match self.fetch(DocumentKind::Summary, game_id).await? {
            RawDocument::Summary(doc) => Ok(doc),
            other => Err(wrong_kind(DocumentKind::Summary, &other)),
        }
    }

    async fn fetch_actions(&self, game_id: u64) -> ApiResult<ActionsResponse> {
        match self.fetch(DocumentKind::Actions, game_id).await? {
            RawDocument::Actions(doc) => Ok(doc),
            other => Err(wrong_kind(DocumentKind::Actions, &other)),
        }
    }

    async fn fetch(&self, kind: DocumentKind, game_id: u64) -> ApiResult<RawDocument> {
        self.source.fetch(kind, game_id).await
    }
}

fn wrong_kind(requested: DocumentKind, got: &RawDocument) -> ApiError {
    ApiError::Other(format!("asked for {requested}, source returned {}", got.kind()))
}
