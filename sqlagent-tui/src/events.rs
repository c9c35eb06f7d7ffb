//! Event types for the TUI event loop.

use crate::api_client::{ApiClientError, RestClient};
use crossterm::event::KeyEvent;
use sqlagent_api::types::{ExecuteSqlResponse, SchemaResponse};
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    Loaded(Outcome),
}

/// A request the application wants performed against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadDatabases,
    LoadTables { database: String },
    LoadSchema { database: String, table: String },
    Generate {
        database: String,
        table: String,
        question: String,
        schema_str: String,
    },
    Execute { database: String, sql: String },
}

/// The API's answer to a [`Command`], tagged with the selection it was
/// issued for.
#[derive(Debug)]
pub enum Outcome {
    Databases(Result<Vec<String>, ApiClientError>),
    Tables {
        database: String,
        result: Result<Vec<String>, ApiClientError>,
    },
    Schema {
        database: String,
        table: String,
        result: Result<SchemaResponse, ApiClientError>,
    },
    Generated {
        database: String,
        table: String,
        result: Result<String, ApiClientError>,
    },
    Executed {
        database: String,
        sql: String,
        result: Result<ExecuteSqlResponse, ApiClientError>,
    },
}

impl Command {
    pub async fn run(self, api: &RestClient) -> Outcome {
        match self {
            Command::LoadDatabases => Outcome::Databases(api.list_databases().await),
            Command::LoadTables { database } => {
                let result = api.list_tables(&database).await;
                Outcome::Tables { database, result }
            }
            Command::LoadSchema { database, table } => {
                let result = api.table_schema(&database, &table).await;
                Outcome::Schema {
                    database,
                    table,
                    result,
                }
            }
            Command::Generate {
                database,
                table,
                question,
                schema_str,
            } => {
                let result = api.generate_sql(&question, &schema_str).await;
                Outcome::Generated {
                    database,
                    table,
                    result,
                }
            }
            Command::Execute { database, sql } => {
                let result = api.execute_sql(&database, &sql).await;
                Outcome::Executed {
                    database,
                    sql,
                    result,
                }
            }
        }
    }
}

/// Run `command` off the UI loop and deliver its outcome as an event.
pub fn dispatch(api: RestClient, command: Command, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let outcome = command.run(&api).await;
        let _ = sender.send(TuiEvent::Loaded(outcome)).await;
    });
}
