//! 한국거래소(KRX) 정보데이터시스템 Provider.
//!
//! 인증키 없이 사용할 수 있는 `data.krx.co.kr` JSON 엔드포인트를 사용합니다.
//!
//! - 전종목 시세 (`MDCSTAT01501`): 기준일의 시장별 상장 종목 코드와 약칭
//! - 종목 검색 (`finder_stkisu`): 목록에 없던 종목의 이름 조회
//!
//! 목록 조회 결과의 종목명은 (시장, 코드) 단위로 캐시해 두므로 일반적인
//! 수집에서는 종목마다 추가 요청이 발생하지 않습니다.

use super::ListingProvider;
use crate::{DataError, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use stockmap_core::Market;

const JSON_DATA_PATH: &str = "/comm/bldAttendant/getJsonData.cmd";
const BLD_ALL_STOCKS: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";
const BLD_FINDER: &str = "dbms/comm/finder/finder_stkisu";

/// KRX Provider 옵션.
#[derive(Debug, Clone)]
pub struct KrxOptions {
    /// 기본 URL (테스트 시 mock 서버로 교체)
    pub base_url: String,
    /// 요청 타임아웃
    pub timeout: Duration,
    /// 기준일이 휴장일일 때 거슬러 올라갈 최대 일수
    pub lookback_days: u32,
}

impl Default for KrxOptions {
    fn default() -> Self {
        Self {
            base_url: "http://data.krx.co.kr".to_string(),
            timeout: Duration::from_secs(30),
            lookback_days: 7,
        }
    }
}

/// KRX 종목 목록 Provider.
pub struct KrxListingProvider {
    client: reqwest::Client,
    options: KrxOptions,
    /// (시장, 종목 코드) → 종목명 (목록 조회 시 채워짐)
    names: RwLock<HashMap<(Market, String), String>>,
}

#[derive(Deserialize)]
struct ListingResponse {
    #[serde(rename = "OutBlock_1")]
    out_block: Option<Vec<RawListing>>,
}

#[derive(Deserialize)]
struct RawListing {
    #[serde(rename = "ISU_SRT_CD")]
    code: String,
    #[serde(rename = "ISU_ABBRV")]
    name: String,
}

#[derive(Deserialize)]
struct FinderResponse {
    #[serde(default)]
    block1: Vec<FinderItem>,
}

#[derive(Deserialize)]
struct FinderItem {
    short_code: String,
    #[serde(rename = "codeName")]
    name: String,
    #[serde(rename = "marketCode", default)]
    market_code: Option<String>,
}

impl KrxListingProvider {
    /// 기본 옵션으로 생성.
    pub fn new() -> Result<Self> {
        Self::with_options(KrxOptions::default())
    }

    pub fn with_options(options: KrxOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| DataError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            options,
            names: RwLock::new(HashMap::new()),
        })
    }

    /// 캐시된 종목명 수
    pub fn cached_names(&self) -> usize {
        self.names.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn cached_name(&self, market: Market, code: &str) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(market, code.to_string()))
            .cloned()
    }

    /// 종목명을 캐시하고 코드 목록을 반환합니다.
    fn cache_names(&self, market: Market, listings: Vec<RawListing>) -> Vec<String> {
        let mut names = self.names.write().unwrap_or_else(|e| e.into_inner());
        listings
            .into_iter()
            .map(|listing| {
                names.insert((market, listing.code.clone()), listing.name);
                listing.code
            })
            .collect()
    }

    async fn post_form<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let url = format!(
            "{}{}",
            self.options.base_url.trim_end_matches('/'),
            JSON_DATA_PATH
        );

        let response = self
            .client
            .post(&url)
            .form(params)
            .header("Referer", "http://data.krx.co.kr/contents/MDC/MDI/mdiLoader")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "KRX 응답 오류 [{}]: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// 특정 일자의 시장 전종목 조회.
    async fn fetch_listings(&self, market: Market, date: NaiveDate) -> Result<Vec<RawListing>> {
        let trd_dd = date.format("%Y%m%d").to_string();
        let params = [
            ("bld", BLD_ALL_STOCKS),
            ("locale", "ko_KR"),
            ("mktId", market.krx_id()),
            ("trdDd", trd_dd.as_str()),
            ("share", "1"),
            ("money", "1"),
            ("csvxls_isNo", "false"),
        ];

        let data: ListingResponse = self.post_form(&params).await?;
        Ok(data.out_block.unwrap_or_default())
    }
}

#[async_trait]
impl ListingProvider for KrxListingProvider {
    fn name(&self) -> &str {
        "KRX"
    }

    async fn list_tickers(&self, market: Market, base_date: NaiveDate) -> Result<Vec<String>> {
        for offset in 0..=self.options.lookback_days {
            let date = base_date - ChronoDuration::days(i64::from(offset));
            let listings = self.fetch_listings(market, date).await?;

            if listings.is_empty() {
                tracing::debug!(%market, date = %date, "종목 없음 (휴장일), 전일 조회");
                continue;
            }

            tracing::info!(%market, date = %date, count = listings.len(), "KRX 종목 조회 완료");
            return Ok(self.cache_names(market, listings));
        }

        // 조회 기간 전체가 비어 있으면 목록을 얻지 못한 것으로 처리
        Err(DataError::NotFound(format!(
            "{} {}일 내 상장 종목 없음 (기준일 {})",
            market, self.options.lookback_days, base_date
        )))
    }

    async fn resolve_name(&self, market: Market, code: &str) -> Result<String> {
        if let Some(name) = self.cached_name(market, code) {
            return Ok(name);
        }

        let params = [
            ("bld", BLD_FINDER),
            ("locale", "ko_KR"),
            ("mktsel", "ALL"),
            ("searchText", code),
            ("typeNo", "0"),
        ];
        let data: FinderResponse = self.post_form(&params).await?;

        let item = data
            .block1
            .into_iter()
            .filter(|item| item.short_code == code)
            .find(|item| {
                item.market_code
                    .as_deref()
                    .map_or(true, |m| m == market.krx_id())
            })
            .ok_or_else(|| DataError::NotFound(format!("{} {}", market, code)))?;

        self.cache_names(
            market,
            vec![RawListing {
                code: code.to_string(),
                name: item.name.clone(),
            }],
        );
        Ok(item.name)
    }
}
