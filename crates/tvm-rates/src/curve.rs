//! The risk-free reference curve.
//!
//! The curve maps a tenor in days (28, 91, 182) to a reference yield in
//! percent, scraped from the central-bank publication page.  The fetch is
//! a blocking, one-shot HTTP call; the result is held in a process-wide
//! cache that is initialized on first use and never refreshed.  A failed
//! fetch is returned to the caller and is *not* cached, so a later query
//! may try again.
//!
//! Tests (and embedders with their own market-data source) install a curve
//! up front via [`install_reference_curve`], which bypasses the network
//! entirely.

use crate::frequency::Frequency;
use crate::interest_rate::InterestRate;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, warn};
use tvm_core::{Error, Rate, Real, Result};

/// The tenors (in days) published on the reference page.
pub const TENOR_DAYS: [u32; 3] = [28, 91, 182];

const SOURCE_URL: &str = "http://www.banxico.org.mx/SieInternet/\
     consultarDirectorioInternetAction.do?accion=consultarCuadro\
     &idCuadro=CF107&sector=22&locale=es";

const SECTION_MARKER: &[u8] = b"Tasa de rendimiento";
const CELL_MARKER: &[u8] = b"<span style=\"visibility:hidden\">";

// Each yield cell sits a fixed distance behind the third hidden-span
// marker after the section heading: the marker itself plus a two-byte
// suffix, then the ten-character right-aligned value.
const MARKER_STRIDE: usize = CELL_MARKER.len() + 2;
const VALUE_WIDTH: usize = 10;

/// Reference yields in percent, keyed by tenor in days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCurve {
    points: BTreeMap<u32, Real>,
}

impl ReferenceCurve {
    /// Build a curve from `(tenor_days, percent)` points.
    pub fn new(points: impl IntoIterator<Item = (u32, Real)>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// The published yield for `tenor_days`, in percent.
    pub fn percent(&self, tenor_days: u32) -> Option<Real> {
        self.points.get(&tenor_days).copied()
    }

    /// The published yield for `tenor_days`, as a decimal rate.
    pub fn rate(&self, tenor_days: u32) -> Option<Rate> {
        self.percent(tenor_days).map(|p| p / 100.0)
    }

    /// The tenors this curve has points for, ascending.
    pub fn tenors(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.keys().copied()
    }
}

/// A source of the reference curve.
pub trait CurveProvider {
    /// Retrieve the full curve.  Fails with [`Error::Retrieval`] when the
    /// document cannot be fetched and [`Error::Parse`] when the expected
    /// markers are missing from it.
    fn fetch_reference_curve(&self) -> Result<ReferenceCurve>;
}

/// Scrapes the reference yields from the central-bank HTML publication.
#[derive(Debug, Clone)]
pub struct BanxicoProvider {
    url: String,
}

impl Default for BanxicoProvider {
    fn default() -> Self {
        Self {
            url: SOURCE_URL.to_owned(),
        }
    }
}

impl BanxicoProvider {
    /// A provider reading from an alternate URL (e.g. a local fixture
    /// server).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CurveProvider for BanxicoProvider {
    fn fetch_reference_curve(&self) -> Result<ReferenceCurve> {
        debug!(url = %self.url, "fetching reference curve");
        let response = reqwest::blocking::get(&self.url)
            .map_err(|e| Error::Retrieval(e.to_string()))?;
        let body = response
            .bytes()
            .map_err(|e| Error::Retrieval(e.to_string()))?;
        // The page is served as Latin-1; all markers and values are ASCII,
        // so the scrape works on raw bytes.
        let curve = parse_reference_document(&body)?;
        debug!(?curve, "reference curve fetched");
        Ok(curve)
    }
}

/// Extract the published yield for each tenor from the raw document.
///
/// The page repeats one section per tenor; within a section the yield is
/// the ten-character cell preceding the third hidden-span marker after the
/// section heading.  The cursor advances to each extracted value so later
/// sections are scanned from where the previous one ended.
pub fn parse_reference_document(document: &[u8]) -> Result<ReferenceCurve> {
    let mut points = BTreeMap::new();
    let mut cursor = 0usize;
    for tenor in TENOR_DAYS {
        let (position, value) = extract_yield(&document[cursor..])
            .map_err(|e| match e {
                Error::Parse(msg) => Error::Parse(format!("{tenor}-day tenor: {msg}")),
                other => other,
            })?;
        points.insert(tenor, value);
        cursor += position;
    }
    Ok(ReferenceCurve { points })
}

fn extract_yield(source: &[u8]) -> Result<(usize, Real)> {
    let base = find(source, SECTION_MARKER)
        .ok_or_else(|| Error::Parse("yield section heading not found".into()))?;
    let section = &source[base..];
    let mut offset = 0usize;
    for _ in 0..3 {
        let hit = find(&section[offset..], CELL_MARKER)
            .ok_or_else(|| Error::Parse("hidden-cell marker not found".into()))?;
        offset += hit + MARKER_STRIDE;
    }
    let position = base + offset - MARKER_STRIDE - VALUE_WIDTH;
    let cell = source
        .get(position..position + VALUE_WIDTH)
        .ok_or_else(|| Error::Parse("yield cell out of bounds".into()))?;
    let text = std::str::from_utf8(cell)
        .map_err(|_| Error::Parse("yield cell is not ASCII".into()))?
        .trim();
    let value: Real = text
        .parse()
        .map_err(|_| Error::Parse(format!("yield cell `{text}` is not a number")))?;
    Ok((position, value))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// ── Process-wide cache ────────────────────────────────────────────────────────

static CURVE: OnceLock<ReferenceCurve> = OnceLock::new();

/// Install the reference curve ahead of any fetch.
///
/// Returns `false` (leaving the cache untouched) if a curve is already
/// cached.  Unit tests use this so they never hit the network.
pub fn install_reference_curve(curve: ReferenceCurve) -> bool {
    CURVE.set(curve).is_ok()
}

/// The process-wide reference curve, fetching it on first use.
///
/// A fetch failure is propagated and not cached; the next call retries.
pub fn reference_curve() -> Result<&'static ReferenceCurve> {
    if let Some(curve) = CURVE.get() {
        return Ok(curve);
    }
    let fetched = BanxicoProvider::default()
        .fetch_reference_curve()
        .map_err(|e| {
            warn!(error = %e, "reference curve fetch failed");
            e
        })?;
    Ok(CURVE.get_or_init(|| fetched))
}

/// The risk-free rate for `tenor_days`, as an [`InterestRate`] compounding
/// `360 / tenor_days` times per year.
pub fn risk_free_rate(tenor_days: u32) -> Result<InterestRate> {
    let curve = reference_curve()?;
    let rate = curve.rate(tenor_days).ok_or_else(|| {
        Error::Domain(format!("no reference rate for a {tenor_days}-day tenor"))
    })?;
    Ok(InterestRate::new(rate, Frequency::per_tenor_days(tenor_days)?))
}
