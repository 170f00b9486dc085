//! TypeScript `Record<string, string>` 리터럴 생성.

use crate::RenderConfig;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use stockmap_core::{write_atomic, InterchangeDocument, NameToTickerMap, Result, TickerToNameMap};

/// 렌더링 결과 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output_path: PathBuf,
    pub name_entries: usize,
    pub ticker_entries: usize,
    pub bytes: usize,
}

/// 작은따옴표 문자열 리터럴용 이스케이프.
///
/// 문자 단위로 한 번만 치환하므로 방금 추가한 역슬래시를 다시 이스케이프하지 않습니다.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 종목명 매핑 정렬: 이름 길이(문자 수) → 사전순
pub fn sorted_name_entries(map: &NameToTickerMap) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = map
        .iter()
        .map(|(name, ticker)| (name.as_str(), ticker.as_str()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    });
    entries
}

/// 티커 매핑 정렬: 티커 사전순
pub fn sorted_ticker_entries(map: &TickerToNameMap) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = map
        .iter()
        .map(|(ticker, name)| (ticker.as_str(), name.as_str()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}

fn push_table(out: &mut String, keyword: &str, ident: &str, entries: &[(&str, &str)]) {
    out.push_str(&format!("// 총 {}개 매핑\n", entries.len()));
    out.push_str(&format!(
        "{} {}: Record<string, string> = {{\n",
        keyword, ident
    ));
    for (key, value) in entries {
        out.push_str(&format!(
            "  '{}': '{}',\n",
            escape_literal(key),
            escape_literal(value)
        ));
    }
    out.push_str("};\n");
}

/// 문서를 TypeScript 소스로 변환합니다.
pub fn render_typescript(
    document: &InterchangeDocument,
    config: &RenderConfig,
    generated_at: NaiveDateTime,
) -> String {
    let keyword = if config.export { "export const" } else { "const" };
    let names = sorted_name_entries(&document.stock_map);
    let tickers = sorted_ticker_entries(&document.ticker_to_name);

    let mut out = String::new();
    out.push_str("// 한국 전체 종목의 한글명-티커 매핑 (자동 생성됨)\n");
    out.push_str(&format!(
        "// 생성일: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    push_table(&mut out, keyword, &config.name_map_ident, &names);

    out.push('\n');
    out.push_str("// 티커를 한글명으로 변환하는 역매핑 (한국 주식용)\n");
    push_table(&mut out, keyword, &config.ticker_map_ident, &tickers);

    out
}

/// 렌더링 전체 실행: 문서 로드 → 변환 → 파일 저장
pub fn run_render(config: &RenderConfig) -> Result<RenderSummary> {
    let document = InterchangeDocument::load(&config.input_path)?;
    tracing::info!(
        path = %config.input_path.display(),
        stock_map = document.stock_map.len(),
        ticker_to_name = document.ticker_to_name.len(),
        "중간 산출물 로드"
    );

    let dangling = document.dangling_tickers();
    if !dangling.is_empty() {
        tracing::warn!(count = dangling.len(), tickers = ?dangling, "역매핑에 없는 티커");
    }

    let generated_at = chrono::Local::now().naive_local();
    let source = render_typescript(&document, config, generated_at);
    write_atomic(&config.output_path, source.as_bytes())?;

    let summary = RenderSummary {
        output_path: config.output_path.clone(),
        name_entries: document.stock_map.len(),
        ticker_entries: document.ticker_to_name.len(),
        bytes: source.len(),
    };
    tracing::info!(
        path = %summary.output_path.display(),
        bytes = summary.bytes,
        "TypeScript 파일 생성 완료"
    );
    Ok(summary)
}
