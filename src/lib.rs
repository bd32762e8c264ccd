//! 핵심 계산 로직을 라이브러리로 분리하여 GUI와 CLI가 같은 비용 모델을 공유한다.

pub mod app;
pub mod comparison;
pub mod config;
pub mod cost_model;
pub mod fields;
pub mod form;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod presentation;
pub mod session;
pub mod ui_cli;
pub mod workflow;
