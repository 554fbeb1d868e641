//! Output formatting for query results

use serde::Serialize;

#[cfg(feature = "colored-output")]
use colored::Colorize;

/// JSON shape of a single answer
#[derive(Debug, Serialize)]
pub struct QueryOutput<'a> {
    pub ip: &'a str,
    pub area: &'a str,
    pub detail: &'a str,
}

/// Format one answer as `"{ip:>15} {area} {detail}"`
pub fn format_text(ip: &str, area: &str, detail: &str, use_color: bool) -> String {
    let info = format!("{} {}", area, detail);
    let info = info.trim_end();

    if use_color {
        #[cfg(feature = "colored-output")]
        {
            return format!("{:>15} {}", ip, info.green());
        }
    }

    format!("{:>15} {}", ip, info)
}

/// Format one answer as a JSON object
pub fn format_json(ip: &str, area: &str, detail: &str) -> serde_json::Result<String> {
    serde_json::to_string(&QueryOutput { ip, area, detail })
}

/// Banner printed before answers unless `--quiet`
pub fn format_banner(version: &str, total: u32) -> String {
    format!("{}\nindex total: {}\n", version, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text() {
        assert_eq!(
            format_text("1.2.3.4", "中国", "电信", false),
            "        1.2.3.4 中国 电信"
        );
    }

    #[test]
    fn test_format_text_without_detail() {
        assert_eq!(format_text("8.8.8.8", "美国", "", false), "        8.8.8.8 美国");
    }

    #[test]
    fn test_format_json() {
        let json = format_json("1.2.3.4", "中国", "电信").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ip"], "1.2.3.4");
        assert_eq!(value["area"], "中国");
        assert_eq!(value["detail"], "电信");
    }

    #[test]
    fn test_format_banner() {
        assert_eq!(format_banner("v1", 3), "v1\nindex total: 3\n");
    }
}
