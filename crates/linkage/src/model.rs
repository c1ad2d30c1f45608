use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One twin pair from the paper roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperEntry {
    pub t1: String,
    pub t2: String,
    pub bestzygos: String,
}

/// One registered user. `colorado_id` is the precomputed SHA-256 of the SVID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub colorado_id: String,
    pub alternate_id: Option<String>,
}

/// Pre-loaded roster and registry.
#[derive(Debug, Clone, Default)]
pub struct LinkageInput {
    pub paper: Vec<PaperEntry>,
    pub users: Vec<UserRecord>,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Names the table an error or log line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Paper,
    Users,
    Wide,
    Long,
}

impl Table {
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Paper | Self::Users)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paper => write!(f, "paper roster"),
            Self::Users => write!(f, "user registry"),
            Self::Wide => write!(f, "wide output"),
            Self::Long => write!(f, "long output"),
        }
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Which twin of a pair a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    T1,
    T2,
}

impl Slot {
    /// Roster column holding this twin's SVID.
    pub fn column(&self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
        }
    }

    /// Slot-qualified name of the resolved alternate ID.
    pub fn alternate_column(&self) -> &'static str {
        match self {
            Self::T1 => "T1_alternate_id",
            Self::T2 => "T2_alternate_id",
        }
    }

    pub fn svid<'a>(&self, row: &'a WideRow) -> &'a str {
        match self {
            Self::T1 => &row.t1,
            Self::T2 => &row.t2,
        }
    }

    pub fn alternate_id<'a>(&self, row: &'a WideRow) -> Option<&'a str> {
        match self {
            Self::T1 => row.t1_alternate_id.as_deref(),
            Self::T2 => row.t2_alternate_id.as_deref(),
        }
    }

    pub fn set_alternate_id(&self, row: &mut WideRow, value: Option<String>) {
        match self {
            Self::T1 => row.t1_alternate_id = value,
            Self::T2 => row.t2_alternate_id = value,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One twin pair with both twins' alternate IDs resolved (if found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    pub t1: String,
    pub t2: String,
    pub t1_alternate_id: Option<String>,
    pub t2_alternate_id: Option<String>,
    pub bestzygos: String,
}

impl WideRow {
    /// Unresolved row for a roster entry.
    pub fn from_entry(entry: &PaperEntry) -> Self {
        Self {
            t1: entry.t1.clone(),
            t2: entry.t2.clone(),
            t1_alternate_id: None,
            t2_alternate_id: None,
            bestzygos: entry.bestzygos.clone(),
        }
    }
}

/// One individual twin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRow {
    pub svid: String,
    pub alternate_id: Option<String>,
    pub bestzygos: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    /// Join input rows whose hashed SVID was found in the registry.
    pub matched: usize,
    /// Join input rows kept with a missing alternate ID.
    pub unmatched: usize,
    /// Extra rows produced by duplicate registry keys.
    pub fan_out: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkageSummary {
    pub paper_rows: usize,
    pub registry_rows: usize,
    pub wide_rows: usize,
    pub long_rows: usize,
    pub t1: SlotSummary,
    pub t2: SlotSummary,
    /// Distinct `colorado_id` values occurring more than once in the registry.
    pub duplicate_registry_keys: usize,
}

#[derive(Debug, Clone)]
pub struct LinkageOutput {
    pub wide: Vec<WideRow>,
    pub long: Vec<LongRow>,
    pub summary: LinkageSummary,
}
