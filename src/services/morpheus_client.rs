//! Blocking client for the networked Greek morphological service.
//!
//! Every failure mode degrades to `None`: the orchestrator treats an
//! unreachable service exactly like a dictionary miss.

use std::{thread, time::Duration};

use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::normalizers::records::MorpheusRecord;

const DEFAULT_ENDPOINT: &str =
    "https://services.perseids.org/bsp/morphologyservice/analysis/word";

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 800;
const TIMEOUT_SECS: u64 = 15;

fn backoff(attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = BASE_DELAY_MS * (2_u64.pow(attempt as u32)) + jitter;
    Duration::from_millis(ms)
}

fn should_retry_http(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

pub struct MorpheusClient {
    client: Option<Client>,
    endpoint: String,
}

impl MorpheusClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| eprintln!("[morpheus] client build failed: {e}"))
            .ok();
        MorpheusClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Morphological analysis of one Greek surface form.
    pub fn analyze(&self, word: &str) -> Option<MorpheusRecord> {
        let client = self.client.as_ref()?;
        let body = self.fetch(client, word)?;
        parse_analysis(&body)
    }

    fn fetch(&self, client: &Client, word: &str) -> Option<Value> {
        let mut last_err: Option<String> = None;

        for attempt in 0..MAX_RETRIES {
            let res = client
                .get(&self.endpoint)
                .query(&[("word", word), ("lang", "grc"), ("engine", "morpheusgrc")])
                .send();

            match res {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        last_err = Some(format!("HTTP {}", status.as_u16()));
                        if should_retry_http(status) && attempt + 1 < MAX_RETRIES {
                            thread::sleep(backoff(attempt));
                            continue;
                        }
                        break;
                    }
                    match resp.json::<Value>() {
                        Ok(v) => return Some(v),
                        Err(e) => {
                            last_err = Some(e.to_string());
                            if attempt + 1 < MAX_RETRIES {
                                thread::sleep(backoff(attempt));
                                continue;
                            }
                        }
                    }
                }
                Err(e) => {
                    last_err = Some(e.to_string());
                    if attempt + 1 < MAX_RETRIES {
                        thread::sleep(backoff(attempt));
                        continue;
                    }
                }
            }
        }

        if let Some(e) = last_err {
            eprintln!("[morpheus] lookup failed for {word}: {e}");
        }
        None
    }
}

impl Default for MorpheusClient {
    fn default() -> Self {
        MorpheusClient::new()
    }
}

/// Pull the first analysis entry out of the service's RDF envelope.
/// The `Body` node is an object for one analysis and an array for several.
fn parse_analysis(body: &Value) -> Option<MorpheusRecord> {
    let annotation_body = body.get("RDF")?.get("Annotation")?.get("Body")?;
    let first = match annotation_body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let entry = first.get("rest")?.get("entry")?;
    let dict = entry.get("dict")?;

    let hdwd = text_field(dict, "hdwd");
    let lemma = hdwd.clone().unwrap_or_default();
    if lemma.is_empty() {
        return None;
    }

    let stem = entry
        .get("infl")
        .map(|infl| match infl {
            Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
            other => other.clone(),
        })
        .as_ref()
        .and_then(|i| text_field(i, "stem"));

    Some(MorpheusRecord {
        lemma,
        hdwd,
        stem,
        pos: text_field(dict, "pofs"),
        gender: text_field(dict, "gend"),
        decl: dict.get("decl").and_then(|d| d.get("$")).cloned(),
        voice: text_field(dict, "voice"),
        verb_class: text_field(dict, "verb_class"),
        genitive: None,
        principal_parts: None,
    })
}

/// Service fields wrap their text as {"$": "..."}.
fn text_field(node: &Value, field: &str) -> Option<String> {
    node.get(field)?
        .get("$")?
        .as_str()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}
