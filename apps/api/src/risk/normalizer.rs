use crate::models::inspection::{Inspection, InspectionStatus, Priority, RawRiskRecord};

/// District token used when an address carries no usable district.
pub const UNKNOWN_DISTRICT: &str = "미상";

const DISTRICT_MARKERS: [char; 2] = ['구', '군'];

/// Converts one raw record into an inspection. Total: malformed addresses
/// degrade to fallback tokens instead of failing.
pub fn normalize(record: &RawRiskRecord, ordinal: usize) -> Inspection {
    let risk_score = compute_risk_score(record.expected_risk);
    let priority = Priority::from_score(risk_score);
    let district = extract_district(&record.address);

    Inspection {
        id: u32::try_from(ordinal + 1).unwrap_or(u32::MAX),
        location: extract_location(&record.address),
        description: describe(priority, &district),
        district,
        address: record.address.clone(),
        priority,
        risk_score,
        status: InspectionStatus::Pending,
        lat: record.y,
        lng: record.x,
        original_risk: record.expected_risk,
    }
}

/// `round(factor * 10)`, floored at zero. Non-finite factors score zero.
pub fn compute_risk_score(factor: f64) -> u32 {
    let scaled = (factor * 10.0).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    }
}

/// First token ending in a 구/군 marker, else the second token, else unknown.
///
/// Matching is on the suffix: "대구광역시" carries 구 mid-word and is a city,
/// not a district.
pub fn extract_district(address: &str) -> String {
    let tokens: Vec<&str> = address.split_whitespace().collect();
    tokens
        .iter()
        .find(|token| token.ends_with(DISTRICT_MARKERS))
        .or_else(|| tokens.get(1))
        .copied()
        .unwrap_or(UNKNOWN_DISTRICT)
        .to_string()
}

/// Last whitespace token (the 동/읍/면), or the whole address without one.
pub fn extract_location(address: &str) -> String {
    address
        .split_whitespace()
        .last()
        .unwrap_or(address)
        .to_string()
}

pub fn describe(priority: Priority, district: &str) -> String {
    match priority {
        Priority::Urgent => format!("긴급 점검이 필요한 고위험 지역 ({district})"),
        Priority::High => format!("안전사고 주의가 필요한 구간 ({district})"),
        Priority::Medium => format!("정기 점검이 필요한 일반 관리 구간 ({district})"),
        Priority::Low => format!("안전 상태가 양호한 모니터링 구간 ({district})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, risk: f64) -> RawRiskRecord {
        RawRiskRecord {
            address: address.to_string(),
            expected_risk: risk,
            x: 128.6,
            y: 35.87,
            weather_tag: "맑음".to_string(),
        }
    }

    #[test]
    fn test_daegu_record_end_to_end() {
        let inspection = normalize(&record("대구광역시 중구 동인동", 7.2), 0);
        assert_eq!(inspection.id, 1);
        assert_eq!(inspection.risk_score, 72);
        assert_eq!(inspection.priority, Priority::Urgent);
        assert_eq!(inspection.district, "중구");
        assert_eq!(inspection.location, "동인동");
        assert_eq!(inspection.status, InspectionStatus::Pending);
        assert!((inspection.lat - 35.87).abs() < f64::EPSILON);
        assert!((inspection.lng - 128.6).abs() < f64::EPSILON);
        assert_eq!(inspection.description, "긴급 점검이 필요한 고위험 지역 (중구)");
    }

    #[test]
    fn test_tier_boundaries_from_risk_factor() {
        let cases = [
            (6.9, 69, Priority::High),
            (7.0, 70, Priority::Urgent),
            (4.9, 49, Priority::Medium),
            (5.0, 50, Priority::High),
            (2.9, 29, Priority::Low),
            (3.0, 30, Priority::Medium),
        ];
        for (factor, score, priority) in cases {
            let inspection = normalize(&record("대구광역시 수성구 지산동", factor), 0);
            assert_eq!(inspection.risk_score, score, "factor {factor}");
            assert_eq!(inspection.priority, priority, "factor {factor}");
        }
    }

    #[test]
    fn test_risk_score_rounds_half_up() {
        assert_eq!(compute_risk_score(5.2257), 52);
        assert_eq!(compute_risk_score(5.25), 53);
        assert_eq!(compute_risk_score(0.04), 0);
    }

    #[test]
    fn test_risk_score_never_negative() {
        assert_eq!(compute_risk_score(-3.0), 0);
        assert_eq!(compute_risk_score(f64::NAN), 0);
        assert_eq!(compute_risk_score(f64::INFINITY), 0);
    }

    #[test]
    fn test_district_prefers_marker_token() {
        assert_eq!(extract_district("대구광역시 수성구 지산동"), "수성구");
        assert_eq!(extract_district("대구광역시 달성군 화원읍"), "달성군");
        assert_eq!(extract_district("대구광역시 중구 동인동"), "중구");
    }

    #[test]
    fn test_district_falls_back_to_second_token() {
        assert_eq!(extract_district("서울특별시 중앙동"), "중앙동");
    }

    #[test]
    fn test_district_unknown_for_single_token() {
        assert_eq!(extract_district("평리동"), UNKNOWN_DISTRICT);
        assert_eq!(extract_district(""), UNKNOWN_DISTRICT);
    }

    #[test]
    fn test_location_is_last_token() {
        assert_eq!(extract_location("대구광역시 중구 기본지역"), "기본지역");
        assert_eq!(extract_location("평리동"), "평리동");
        assert_eq!(extract_location(""), "");
    }

    #[test]
    fn test_description_embeds_district() {
        assert_eq!(
            describe(Priority::Low, "북구"),
            "안전 상태가 양호한 모니터링 구간 (북구)"
        );
        assert!(describe(Priority::Medium, "동구").contains("정기 점검"));
    }
}
