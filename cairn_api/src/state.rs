use std::sync::Arc;

use cairn_graphhopper::client::RoutingEngine;
use cairn_navigation::translation::TranslationLookup;

pub struct AppState<E: RoutingEngine> {
    pub engine: E,
    pub translations: Arc<dyn TranslationLookup>,
}
