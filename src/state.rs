use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::mailer::Mailer;
use crate::services::sheets::SheetMirror;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub sheets: Box<dyn SheetMirror>,
    pub mailer: Box<dyn Mailer>,
}
