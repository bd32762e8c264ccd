//! 비교 결과를 표와 차트로 표시하는 모듈 모음.

pub mod charts;
pub mod png;
pub mod slots;
pub mod table;

pub use charts::{build_charts, ChartKind, ChartPayload, ChartSlot};
pub use png::{ChartError, PngChartRenderer};
pub use slots::{ChartRenderer, ChartSlots};
pub use table::{build_table, format_amount, render_text_table, ComparisonRow};
