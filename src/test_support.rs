use chrono::NaiveDate;

use crate::models::trip::{Accommodation, Budget, Destination, TripRecord};

pub fn sample_trip() -> TripRecord {
    TripRecord {
        destination: Destination {
            city: "三亚".into(),
            country: "中国".into(),
            region: "海南".into(),
        },
        departure_date: NaiveDate::from_ymd_opt(2026, 2, 4).unwrap(),
        return_date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
        duration_days: 2,
        budget: Budget {
            total: 3000.0,
            currency: "CNY".into(),
        },
        purpose: "vacation".into(),
        travelers: 2,
        climate: "热带海洋性气候，温暖湿润".into(),
        activities: vec![
            "海滩".into(),
            "水上活动".into(),
            "海鲜美食".into(),
            "观光".into(),
        ],
        accommodation: Accommodation {
            kind: "度假酒店".into(),
            location: "亚龙湾".into(),
        },
        notes: "上海到三亚的2天周末游".into(),
    }
}
