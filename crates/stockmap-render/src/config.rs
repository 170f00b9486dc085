//! 렌더링 설정.

use std::path::PathBuf;
use stockmap_core::config::{env_var_bool, env_var_path, env_var_string};

/// 중간 산출물 기본 경로
pub const DEFAULT_INPUT_PATH: &str = "scripts/korean_stocks_data.json";
/// 생성 파일 기본 경로
pub const DEFAULT_OUTPUT_PATH: &str = "scripts/korean_stocks_maps.ts";

/// 렌더링 설정
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// 중간 산출물(JSON) 경로
    pub input_path: PathBuf,
    /// 생성할 TypeScript 파일 경로
    pub output_path: PathBuf,
    /// 종목명 → 티커 상수 이름
    pub name_map_ident: String,
    /// 티커 → 종목명 상수 이름
    pub ticker_map_ident: String,
    /// `export const`로 선언할지 여부
    pub export: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            name_map_ident: "KOREAN_STOCK_MAP".to_string(),
            ticker_map_ident: "KOREAN_TICKER_TO_NAME_MAP".to_string(),
            export: false,
        }
    }
}

impl RenderConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            input_path: env_var_path("STOCKMAP_DATA_PATH").unwrap_or(defaults.input_path),
            output_path: env_var_path("STOCKMAP_OUTPUT_PATH").unwrap_or(defaults.output_path),
            name_map_ident: env_var_string("STOCKMAP_NAME_MAP_IDENT", &defaults.name_map_ident),
            ticker_map_ident: env_var_string(
                "STOCKMAP_TICKER_MAP_IDENT",
                &defaults.ticker_map_ident,
            ),
            export: env_var_bool("STOCKMAP_EXPORT", defaults.export),
        }
    }
}
