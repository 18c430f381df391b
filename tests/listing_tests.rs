mod common;

#[cfg(test)]
pub mod listing_tests {
    use serde_json::json;

    use super::common::*;

    use schoolpress::models::*;
    use schoolpress::services::*;

    fn gallery() -> Vec<GalleryImage> {
        serde_json::from_value(seed_gallery()).unwrap()
    }

    #[test]
    fn test_category_filter_keeps_server_order() {
        let images = gallery();

        let sports = filter_by_category(&images, &CategoryFilter::parse(Some("Sports")));
        let ids: Vec<i64> = sports.iter().map(|image| image.id.0).collect();
        assert_eq!(ids, vec![1, 3]);

        let all = filter_by_category(&images, &CategoryFilter::parse(Some("All")));
        assert_eq!(all.len(), images.len());

        let none = filter_by_category(&images, &CategoryFilter::parse(Some("Facilities")));
        assert!(none.is_empty());
    }

    #[test]
    fn test_categories_are_distinct_in_first_seen_order() {
        let images = gallery();
        assert_eq!(categories(&images), vec!["Sports", "Academics", "Events"]);
    }

    #[test]
    fn test_leadership_only() {
        let staff: Vec<Staff> = serde_json::from_value(json!([
            staff_json(1, "Mr. Otieno", true),
            staff_json(2, "Ms. Wanjiru", false),
            staff_json(3, "Mrs. Achieng", true),
        ]))
        .unwrap();

        let leaders: Vec<&str> = leadership(&staff).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(leaders, vec!["Mr. Otieno", "Mrs. Achieng"]);
    }

    #[test]
    fn test_group_stats_by_category() {
        let mut raw = seed_stats();
        raw.as_array_mut()
            .unwrap()
            .push(stat_json(4, "classrooms", "40", "not-a-category"));
        raw.as_array_mut()
            .unwrap()
            .push(stat_json(5, "pass_rate", "92%", "academics"));
        let stats: Vec<SchoolStat> = serde_json::from_value(raw).unwrap();

        let groups = group_stats(&stats);
        let order: Vec<StatCategory> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![
                StatCategory::Students,
                StatCategory::Staff,
                StatCategory::Academics,
                StatCategory::General,
            ]
        );
        assert_eq!(groups[2].stats.len(), 2);

        assert_eq!(stat_value(&stats, "kcse_mean_grade"), Some("A-"));
        assert_eq!(stat_value(&stats, "missing"), None);
    }
}
