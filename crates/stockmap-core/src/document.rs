//! 수집 단계와 렌더링 단계 사이의 중간 산출물.
//!
//! JSON 형식:
//!
//! ```json
//! {
//!   "stocks": [{ "ticker": "005930.KS", "name": "삼성전자" }],
//!   "stock_map": { "삼성전자": "005930.KS" },
//!   "ticker_to_name": { "005930.KS": "삼성전자" }
//! }
//! ```

use crate::{AliasRules, Result, StockMapError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 종목명/별칭 → 티커
pub type NameToTickerMap = BTreeMap<String, String>;

/// 티커 → 종목명
pub type TickerToNameMap = BTreeMap<String, String>;

/// 상장 종목 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// 접미사가 붙은 티커 (예: 005930.KS)
    pub ticker: String,
    /// 종목명 (예: 삼성전자)
    pub name: String,
}

impl Listing {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
        }
    }
}

/// 중간 산출물 문서.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterchangeDocument {
    /// 수집 순서대로의 종목 목록
    #[serde(default)]
    pub stocks: Vec<Listing>,
    /// 종목명/별칭 → 티커
    pub stock_map: NameToTickerMap,
    /// 티커 → 종목명
    pub ticker_to_name: TickerToNameMap,
}

impl InterchangeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목을 추가하고 기본 매핑을 등록합니다.
    pub fn insert_listing(&mut self, listing: Listing) {
        self.stock_map
            .insert(listing.name.clone(), listing.ticker.clone());
        self.ticker_to_name
            .insert(listing.ticker.clone(), listing.name.clone());
        self.stocks.push(listing);
    }

    /// 종목을 추가하고 별칭 규칙을 적용합니다.
    ///
    /// 등록된 별칭 수를 반환합니다. 같은 별칭은 나중에 매칭된 종목이 덮어씁니다.
    pub fn insert_with_aliases(&mut self, listing: Listing, rules: &AliasRules) -> usize {
        let ticker = listing.ticker.clone();
        let aliases = rules.aliases_for(&listing.name);
        let count = aliases.len();

        self.insert_listing(listing);

        for alias in aliases {
            if let Some(previous) = self.stock_map.insert(alias.to_string(), ticker.clone()) {
                if previous != ticker {
                    tracing::debug!(alias, previous = %previous, ticker = %ticker, "별칭 덮어쓰기");
                }
            }
        }
        count
    }

    /// 정식 종목명과 다른 키(별칭) 수
    pub fn alias_count(&self) -> usize {
        self.stock_map
            .iter()
            .filter(|(name, ticker)| self.ticker_to_name.get(*ticker) != Some(*name))
            .count()
    }

    /// `stock_map`의 모든 값이 `ticker_to_name`에 존재하는지 확인합니다.
    pub fn dangling_tickers(&self) -> Vec<&str> {
        self.stock_map
            .values()
            .filter(|ticker| !self.ticker_to_name.contains_key(*ticker))
            .map(String::as_str)
            .collect()
    }

    /// 파일에서 문서를 읽습니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StockMapError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| StockMapError::DocumentFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 2칸 들여쓰기 JSON 문자열 (한글은 이스케이프하지 않음)
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|source| StockMapError::DocumentFormat {
                path: Default::default(),
                source,
            })?;
        json.push('\n');
        Ok(json)
    }

    /// 파일로 저장합니다.
    ///
    /// 임시 파일에 먼저 쓴 뒤 이름을 바꾸므로 실패해도 기존 파일은 그대로 남습니다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        write_atomic(path.as_ref(), json.as_bytes())
    }
}

/// 임시 파일에 쓴 뒤 대상 경로로 이름을 바꿉니다.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StockMapError::io(parent, e))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, contents).map_err(|e| StockMapError::io(tmp, e))?;
    fs::rename(tmp, path).map_err(|e| {
        let _ = fs::remove_file(tmp);
        StockMapError::io(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_listing_registers_both_maps() {
        let mut doc = InterchangeDocument::new();
        doc.insert_listing(Listing::new("005930.KS", "삼성전자"));

        assert_eq!(doc.stocks, vec![Listing::new("005930.KS", "삼성전자")]);
        assert_eq!(doc.stock_map["삼성전자"], "005930.KS");
        assert_eq!(doc.ticker_to_name["005930.KS"], "삼성전자");
        assert_eq!(doc.alias_count(), 0);
    }

    #[test]
    fn test_insert_with_aliases() {
        let rules = AliasRules::default();
        let mut doc = InterchangeDocument::new();

        let added = doc.insert_with_aliases(Listing::new("000660.KS", "SK하이닉스"), &rules);
        assert_eq!(added, 1);
        assert_eq!(doc.stock_map["하이닉스"], "000660.KS");
        assert_eq!(doc.stock_map["SK하이닉스"], "000660.KS");
        assert_eq!(doc.alias_count(), 1);
        assert!(doc.dangling_tickers().is_empty());
    }

    #[test]
    fn test_json_keeps_korean_literal() {
        let mut doc = InterchangeDocument::new();
        doc.insert_listing(Listing::new("005930.KS", "삼성전자"));

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"삼성전자\""));
        assert!(!json.contains("\\u"));
        assert!(json.contains("\n  \"stocks\": ["));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"stocks\": [").unwrap();

        let err = InterchangeDocument::load(&path).unwrap_err();
        assert!(matches!(err, StockMapError::DocumentFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InterchangeDocument::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StockMapError::DocumentIo { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/korean_stocks_data.json");

        let mut doc = InterchangeDocument::new();
        doc.insert_listing(Listing::new("035720.KS", "카카오"));
        doc.save(&path).unwrap();

        assert_eq!(InterchangeDocument::load(&path).unwrap(), doc);
        assert!(!dir.path().join("nested/korean_stocks_data.json.tmp").exists());
    }
}
