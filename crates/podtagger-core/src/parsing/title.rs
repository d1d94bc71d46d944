use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]*[ \-]*").unwrap());
static DOTTED_DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{2}\.[0-9]{2}\.[0-9]{2,4}").unwrap());
static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{2,4}-[0-9]{2}-[0-9]{2}").unwrap());
static COMEDY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"comedy: *").unwrap());
static TED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"TED: *").unwrap());
static DASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"- *").unwrap());
static TRAILING_SPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" +$").unwrap());
static SPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Reglas de limpieza de títulos. Cada una borra todas sus coincidencias;
/// se aplican en el orden de [`TitleRule::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// `220109-...`, `20220109 ...`
    LeadingNumber,
    /// `01.02.20`, `01.02.2020`
    DottedDate,
    /// `2021-02-01`
    IsoDate,
    ComedyPrefix,
    TedPrefix,
    Dash,
    TrailingSpaces,
}

impl TitleRule {
    pub const ALL: &'static [TitleRule] = &[
        TitleRule::LeadingNumber,
        TitleRule::DottedDate,
        TitleRule::IsoDate,
        TitleRule::ComedyPrefix,
        TitleRule::TedPrefix,
        TitleRule::Dash,
        TitleRule::TrailingSpaces,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            TitleRule::LeadingNumber => &LEADING_NUMBER_REGEX,
            TitleRule::DottedDate => &DOTTED_DATE_REGEX,
            TitleRule::IsoDate => &ISO_DATE_REGEX,
            TitleRule::ComedyPrefix => &COMEDY_REGEX,
            TitleRule::TedPrefix => &TED_REGEX,
            TitleRule::Dash => &DASH_REGEX,
            TitleRule::TrailingSpaces => &TRAILING_SPACES_REGEX,
        }
    }

    pub fn apply<'a>(&self, title: &'a str) -> Cow<'a, str> {
        self.regex().replace_all(title, "")
    }
}

fn normalize_once(title: &str) -> String {
    let stripped = TitleRule::ALL
        .iter()
        .fold(title.to_string(), |acc, rule| rule.apply(&acc).into_owned());
    SPACE_RUN_REGEX.replace_all(&stripped, " ").into_owned()
}

/// Limpia un título quitando números de episodio, fechas y prefijos de relleno.
///
/// Las reglas solo borran texto, así que repetir la pasada hasta que el
/// resultado no cambie siempre termina y deja un resultado estable.
pub fn normalize_title(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
