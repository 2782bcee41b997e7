#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Lookup,
    LookupEntry,
    NormalizeRecord,
    CleanSense,
    Enrich,
    MissingReport,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "lookup" => Command::Lookup,
            "lookup_entry" => Command::LookupEntry,
            "normalize_record" => Command::NormalizeRecord,
            "clean_sense" => Command::CleanSense,
            "enrich" => Command::Enrich,
            "missing_report" => Command::MissingReport,
            _ => Command::Unknown,
        }
    }
}
