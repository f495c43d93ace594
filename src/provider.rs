use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chrono::Local;

use crate::error::FetchError;
use crate::http_client::http_client;
use crate::standings_fetch::fetch_standings;
use crate::state::{Delta, ProviderCommand};

/// Runs standings fetches for the terminal front-end on a worker thread.
/// Commands are handled one at a time, in the order they were sent.
pub fn spawn_standings_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    base_url: String,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[ERROR] Provider runtime failed: {err}")));
                return;
            }
        };
        let client = match http_client() {
            Ok(client) => client,
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[ERROR] {err:#}")));
                return;
            }
        };

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchStandings { seq, league } => {
                    let result = runtime.block_on(fetch_standings(client, &base_url, &league));
                    let delta = match result {
                        Ok(report) => Delta::SetStandings {
                            seq,
                            report,
                            updated: Local::now().format("%d.%m.%Y %H:%M:%S").to_string(),
                        },
                        Err(FetchError::UnknownLeague(league)) => {
                            Delta::UnknownLeague { seq, league }
                        }
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    });
}
