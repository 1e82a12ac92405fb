use smartcatalog_core::api::HttpBackend;
use smartcatalog_core::boq::{BoqSummary, PROCESS_FAILED};
use smartcatalog_core::error::CatalogError;
use smartcatalog_core::notice::Notice;
use smartcatalog_core::{BoqSession, DefaultSelection};
use std::io::Read;
use std::path::PathBuf;

use super::{announce, failed};
use crate::output;

/// Where the BOQ comes from.
pub enum BoqInput {
    Text(String),
    TextFile(PathBuf),
    Document(PathBuf),
}

impl BoqInput {
    /// Resolve the `boq` flags. With none given, items are read from stdin.
    pub fn from_args(
        text: Option<String>,
        file: Option<PathBuf>,
        document: Option<PathBuf>,
    ) -> Result<BoqInput, Notice> {
        match (text, file, document) {
            (Some(t), _, _) => Ok(BoqInput::Text(t)),
            (None, Some(f), _) => Ok(BoqInput::TextFile(f)),
            (None, None, Some(d)) => Ok(BoqInput::Document(d)),
            (None, None, None) => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(CatalogError::Io)
                    .map_err(failed(PROCESS_FAILED))?;
                Ok(BoqInput::Text(buf))
            }
        }
    }
}

pub fn run(
    backend: &HttpBackend,
    input: BoqInput,
    selections: &[String],
    preselect: bool,
    output_format: &str,
) -> Result<(), Notice> {
    let selections = selections
        .iter()
        .map(|s| parse_selection(s))
        .collect::<Result<Vec<_>, _>>()?;

    let policy = if preselect {
        DefaultSelection::FirstCandidate
    } else {
        DefaultSelection::Unset
    };

    let mut session = BoqSession::new();
    let submitted = match input {
        BoqInput::Text(text) => session.submit_text(backend, &text, policy),
        BoqInput::TextFile(path) => session.submit_text_file(backend, &path, policy),
        BoqInput::Document(path) => session.submit_file(backend, &path, policy),
    };
    submitted.map_err(failed(PROCESS_FAILED))?;

    for (row, id) in selections {
        let known = session
            .results()
            .get(row)
            .is_some_and(|r| r.matches.iter().any(|m| m.id == id));
        if !known {
            tracing::warn!(
                row = row + 1,
                id,
                "no candidate with this id; selection unchanged"
            );
        }
        session.select(row, id);
    }

    let summary = BoqSummary::of(session.results());
    announce(&Notice::for_boq(&summary));

    match output_format {
        "json" => output::json::print(session.results()),
        _ => {
            output::table::print_boq(session.results(), &backend.config().storage_url);
            Ok(())
        }
    }
}

/// Parse `ROW=ID` with a 1-based row into a 0-based index and product id.
fn parse_selection(s: &str) -> Result<(usize, i64), Notice> {
    let invalid = || {
        Notice::from_error(
            &CatalogError::Config(format!("invalid --select '{s}', expected ROW=PRODUCT_ID")),
            PROCESS_FAILED,
        )
    };
    let (row, id) = s.split_once('=').ok_or_else(invalid)?;
    let row: usize = row.trim().parse().map_err(|_| invalid())?;
    let id: i64 = id.trim().parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok((row - 1, id))
}
