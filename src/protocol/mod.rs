use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::model::entry::Language;
use crate::model::token::Token;
use crate::normalizers::lewis_short::LewisShortNormalizer;
use crate::normalizers::lsj::LsjNormalizer;
use crate::normalizers::morpheus::MorpheusNormalizer;
use crate::normalizers::records::{LewisShortRecord, LsjRecord, MorpheusRecord, WhitakersRecord};
use crate::normalizers::senses;
use crate::normalizers::whitakers::WhitakersNormalizer;
use crate::services::greek::GreekLexicon;
use crate::services::latin::LatinLexicon;
use crate::services::report;

mod command;
use command::Command;

const DEFAULT_DATA_DIR: &str = "dictionaries";

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_language(payload: &Value) -> Result<Language, String> {
    match payload.get("language").and_then(|v| v.as_str()).unwrap_or("") {
        "latin" => Ok(Language::Latin),
        "greek" => Ok(Language::Greek),
        "" => Err("payload.language is required".to_string()),
        other => Err(format!("unknown language: {other}")),
    }
}

fn data_dir(payload: &Value) -> PathBuf {
    PathBuf::from(
        payload
            .get("data_dir")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_DATA_DIR),
    )
}

fn latin_lexicon(payload: &Value) -> LatinLexicon {
    let dir = data_dir(payload);
    LatinLexicon::new(dir.join("whitakers"), dir.join("lewis_short"))
}

fn greek_lexicon(payload: &Value) -> GreekLexicon {
    GreekLexicon::new(data_dir(payload).join("lsj"))
}

fn parse_tokens_from_payload(payload: &Value) -> Result<Vec<Token>, String> {
    let arr = payload
        .get("tokens")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.tokens must be an array".to_string())?;

    let mut tokens: Vec<Token> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<Token>(v) {
            Ok(t) => tokens.push(t),
            Err(e) => return Err(format!("invalid token at index {}: {}", i, e)),
        }
    }

    Ok(tokens)
}

fn parse_count_map(payload: &Value, field: &str) -> HashMap<String, u32> {
    payload
        .get(field)
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_u64().map(|n| (k.clone(), n as u32)))
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_record(payload: &Value) -> Result<Value, String> {
    let source = payload.get("source").and_then(|v| v.as_str()).unwrap_or("");
    let lemma = payload.get("lemma").and_then(|v| v.as_str()).unwrap_or("");
    let record = payload.get("record").cloned().unwrap_or(Value::Null);
    if record.is_null() {
        return Err("payload.record is required".to_string());
    }

    let entry = match source {
        "whitakers" => {
            let r: WhitakersRecord =
                serde_json::from_value(record).map_err(|e| format!("invalid record: {e}"))?;
            WhitakersNormalizer::default().normalize(&r, lemma)
        }
        "lewis_short" => {
            let r: LewisShortRecord =
                serde_json::from_value(record).map_err(|e| format!("invalid record: {e}"))?;
            LewisShortNormalizer::default().normalize(&r, lemma)
        }
        "lsj" => {
            let r: LsjRecord =
                serde_json::from_value(record).map_err(|e| format!("invalid record: {e}"))?;
            LsjNormalizer::default().normalize(&r, lemma)
        }
        "morpheus" => {
            let r: MorpheusRecord =
                serde_json::from_value(record).map_err(|e| format!("invalid record: {e}"))?;
            let senses: Vec<String> = payload
                .get("senses")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|s| s.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            MorpheusNormalizer::new().normalize(&r, lemma, &senses)
        }
        "" => return Err("payload.source is required".to_string()),
        other => return Err(format!("unknown source: {other}")),
    };

    serde_json::to_value(entry).map_err(|e| e.to_string())
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd = Command::from(get_cmd(&req));
    let payload = get_payload(&req);

    match cmd {
        Command::Ping => ok(id, json!({ "message": "glossa-core alive" })),

        Command::Lookup => {
            let lemma = payload.get("lemma").and_then(|v| v.as_str()).unwrap_or("");
            if lemma.is_empty() {
                return err(id, "payload.lemma is required");
            }
            let language = match parse_language(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let definitions = match language {
                Language::Latin => latin_lexicon(payload).lookup(lemma),
                Language::Greek => greek_lexicon(payload).lookup(lemma),
            };
            ok(id, json!({ "definitions": definitions }))
        }

        Command::LookupEntry => {
            let lemma = payload.get("lemma").and_then(|v| v.as_str()).unwrap_or("");
            if lemma.is_empty() {
                return err(id, "payload.lemma is required");
            }
            let language = match parse_language(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let entry = match language {
                Language::Latin => latin_lexicon(payload).lookup_normalized(lemma),
                Language::Greek => greek_lexicon(payload).lookup_normalized(lemma),
            };
            ok(id, json!({ "entry": entry }))
        }

        Command::NormalizeRecord => match normalize_record(payload) {
            Ok(entry) => ok(id, json!({ "entry": entry })),
            Err(e) => err(id, e),
        },

        Command::CleanSense => {
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let language = match parse_language(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let cleaned = senses::clean_sense(language, text);
            ok(id, json!({ "sense": cleaned }))
        }

        Command::Enrich => {
            let language = match parse_language(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let mut tokens = match parse_tokens_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let frequency = parse_count_map(payload, "frequency");
            let first_occurrence = parse_count_map(payload, "first_occurrence");

            let missing = match language {
                Language::Latin => {
                    latin_lexicon(payload).enrich(&mut tokens, &frequency, &first_occurrence)
                }
                Language::Greek => {
                    greek_lexicon(payload).enrich(&mut tokens, &frequency, &first_occurrence)
                }
            };
            ok(
                id,
                json!({ "tokens": tokens, "missing": missing.into_items() }),
            )
        }

        Command::MissingReport => {
            let tokens = match parse_tokens_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let missing = report::from_tokens(&tokens);
            ok(id, json!({ "missing": missing.into_items() }))
        }

        _ => err(id, "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(response: &str) -> Value {
        serde_json::from_str(response).unwrap()
    }

    #[test]
    fn ping_answers_with_id() {
        let resp = parse(&handle(r#"{"id": 7, "cmd": "ping"}"#));
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["status"], "ok");
    }

    #[test]
    fn invalid_json_is_an_error_response() {
        let resp = parse(&handle("not json"));
        assert_eq!(resp["status"], "error");
    }

    #[test]
    fn unknown_command_is_rejected() {
        let resp = parse(&handle(r#"{"id": 1, "cmd": "bogus"}"#));
        assert_eq!(resp["status"], "error");
    }

    #[test]
    fn normalize_record_round_trips_a_lewis_short_record() {
        let req = json!({
            "id": 2,
            "cmd": "normalize_record",
            "payload": {
                "source": "lewis_short",
                "lemma": "amo",
                "record": {
                    "key": "amo",
                    "title_orthography": "ămō",
                    "part_of_speech": "v. a.",
                    "main_notes": "ămō, āvi, ātum, 1, v. a.",
                    "senses": ["to like, to love"]
                }
            }
        });
        let resp = parse(&handle(&req.to_string()));
        assert_eq!(resp["status"], "ok");
        let entry = &resp["payload"]["entry"];
        assert_eq!(entry["pos"], "verb");
        assert_eq!(entry["conjugation"], 1);
    }

    #[test]
    fn clean_sense_requires_language() {
        let resp = parse(&handle(
            r#"{"id": 3, "cmd": "clean_sense", "payload": {"text": "to love"}}"#,
        ));
        assert_eq!(resp["status"], "error");
    }

    #[test]
    fn missing_report_collects_unglossed_tokens() {
        let req = json!({
            "id": 4,
            "cmd": "missing_report",
            "payload": {"tokens": [
                {"text": "arma", "line_number": 1},
                {"text": ".", "is_punct": true}
            ]}
        });
        let resp = parse(&handle(&req.to_string()));
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["missing"][0]["lemma"], "arma");
    }
}
