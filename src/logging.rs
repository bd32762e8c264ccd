use tracing::Level;

/// 설정 문자열을 로그 수준으로 바꾼다. 알 수 없는 값은 `info`.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// stderr로 출력하는 fmt 구독자를 설치한다. 이미 설치돼 있으면 그대로 둔다.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level(" WARN "), Level::WARN);
        assert_eq!(parse_level("loud"), Level::INFO);
    }
}
