//! 중간 산출물(JSON) → TypeScript 매핑 소스 생성.
//!
//! 생성 결과는 입력 문서와 생성 시각만으로 결정됩니다.
//! 같은 문서를 두 번 렌더링하면 생성 시각 줄을 제외하고 동일합니다.

pub mod config;
pub mod typescript;

pub use config::RenderConfig;
pub use typescript::{
    escape_literal, render_typescript, run_render, sorted_name_entries, sorted_ticker_entries,
    RenderSummary,
};
