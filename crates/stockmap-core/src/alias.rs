//! 종목 별칭 규칙.
//!
//! 정식 종목명이 특정 패턴에 맞으면 추가 이름(별칭)을 같은 티커에 연결합니다.
//! 예: 종목명에 "하이닉스"가 포함되면 "하이닉스" → SK하이닉스 티커.
//!
//! 규칙은 순서가 있는 목록이며 종목마다 전부 평가됩니다.
//! TOML 파일로 규칙을 교체할 수 있습니다:
//!
//! ```toml
//! [[rules]]
//! aliases = ["현대차"]
//! pattern = { all_of = [{ contains = "현대" }, { contains = "자동차" }] }
//! ```

use crate::{Result, StockMapError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 종목명 조건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePattern {
    /// 부분 문자열 포함
    Contains(String),
    /// 접두사 일치
    StartsWith(String),
    /// 모든 조건 만족
    AllOf(Vec<NamePattern>),
    /// 하나 이상 만족
    AnyOf(Vec<NamePattern>),
}

impl NamePattern {
    pub fn contains(token: impl Into<String>) -> Self {
        Self::Contains(token.into())
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Contains(token) => name.contains(token.as_str()),
            Self::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            Self::AllOf(patterns) => patterns.iter().all(|p| p.matches(name)),
            Self::AnyOf(patterns) => patterns.iter().any(|p| p.matches(name)),
        }
    }
}

/// 조건 하나와 그 조건에 맞는 종목에 붙일 별칭들.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub pattern: NamePattern,
    pub aliases: Vec<String>,
}

impl AliasRule {
    pub fn new(pattern: NamePattern, aliases: &[&str]) -> Self {
        Self {
            pattern,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// 순서가 있는 별칭 규칙 목록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRules {
    #[serde(default)]
    pub rules: Vec<AliasRule>,
}

impl AliasRules {
    /// 규칙이 없는 목록
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<AliasRule>) -> Self {
        Self { rules }
    }

    /// 종목명에 해당하는 별칭 (규칙 순서대로)
    pub fn aliases_for(&self, name: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.matches(name))
            .flat_map(|rule| rule.aliases.iter().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// TOML 문자열에서 규칙 로드
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: Self = toml::from_str(content)
            .map_err(|e| StockMapError::Config(format!("별칭 규칙 파싱 실패: {}", e)))?;

        if let Some(rule) = rules.rules.iter().find(|r| r.aliases.is_empty()) {
            return Err(StockMapError::Config(format!(
                "별칭이 비어 있는 규칙: {:?}",
                rule.pattern
            )));
        }
        Ok(rules)
    }

    /// TOML 파일에서 규칙 로드
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StockMapError::io(path, e))?;
        let rules = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), count = rules.len(), "별칭 규칙 로드");
        Ok(rules)
    }
}

impl Default for AliasRules {
    /// 기본 별칭 규칙.
    fn default() -> Self {
        use NamePattern as P;

        Self::new(vec![
            AliasRule::new(P::contains("하이닉스"), &["하이닉스"]),
            AliasRule::new(
                P::AllOf(vec![P::contains("현대"), P::contains("자동차")]),
                &["현대차"],
            ),
            AliasRule::new(
                P::AllOf(vec![P::starts_with("LG"), P::contains("에너지")]),
                &["LG에너솔", "LGES"],
            ),
            AliasRule::new(
                P::AllOf(vec![
                    P::starts_with("SK"),
                    P::AnyOf(vec![P::contains("증권"), P::contains("지주")]),
                ]),
                &["SK지주", "SK지주사"],
            ),
        ])
    }
}
