use std::hash::Hash;
use std::time::Instant;

use tracing::debug;

use crate::company::{Company, Field};
use crate::stats::{FrequencyTable, GroupedTable};

/// Counts records per key in a single pass. Records for which `selector`
/// returns `None` are skipped.
pub fn count_by<I, K, F>(records: I, mut selector: F) -> FrequencyTable<K>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> Option<K>,
{
    let mut table = FrequencyTable::new();
    for record in records {
        if let Some(key) = selector(&record) {
            *table.entry(key).or_insert(0) += 1;
        }
    }
    table
}

/// Like [`count_by`], but keeps the records themselves under each key.
pub fn group_by<I, K, F>(records: I, mut selector: F) -> GroupedTable<K, I::Item>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> Option<K>,
{
    let mut table = GroupedTable::new();
    for record in records {
        if let Some(key) = selector(&record) {
            table.entry(key).or_insert_with(Vec::new).push(record);
        }
    }
    table
}

pub fn count_by_field<'a, I>(companies: I, field: Field) -> FrequencyTable<&'a str>
where
    I: IntoIterator<Item = &'a Company>,
{
    let start_time = Instant::now();
    let table = count_by(companies, |company: &&'a Company| field.select(*company));
    debug!(
        action = "count",
        component = "aggregate",
        field = field.slug(),
        distinct_values = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Counted companies by field"
    );
    table
}

pub fn group_by_field<'a, I>(companies: I, field: Field) -> GroupedTable<&'a str, &'a Company>
where
    I: IntoIterator<Item = &'a Company>,
{
    group_by(companies, |company: &&'a Company| field.select(*company))
}

/// Companies without a registration date are left out.
pub fn count_by_registration_year<'a, I>(companies: I) -> FrequencyTable<i32>
where
    I: IntoIterator<Item = &'a Company>,
{
    let start_time = Instant::now();
    let table = count_by(companies, |company: &&'a Company| {
        company.registration_year()
    });
    debug!(
        action = "count",
        component = "aggregate",
        field = "registration_year",
        distinct_values = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Counted companies by registration year"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::total;
    use chrono::NaiveDate;

    fn company(cin: &str, status: &str, registered: Option<(i32, u32, u32)>) -> Company {
        Company {
            cin: cin.to_string(),
            status: status.to_string(),
            company_class: "private".to_string(),
            date_of_registration: registered
                .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Company> {
        vec![
            company("C1", "active", Some((1991, 1, 2))),
            company("C2", "active", None),
            company("C3", "dissolved", Some((1991, 7, 30))),
            company("C4", "under liquidation", Some((2005, 12, 1))),
            company("C5", "active", Some((2019, 4, 9))),
        ]
    }

    #[test]
    fn test_count_by_status() {
        let companies = vec![
            company("A", "active", None),
            company("B", "active", None),
            company("C", "dissolved", None),
        ];

        let table = count_by_field(&companies, Field::Status);

        assert_eq!(table.len(), 2);
        assert_eq!(table["active"], 2);
        assert_eq!(table["dissolved"], 1);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let companies: Vec<Company> = Vec::new();
        assert!(count_by_field(&companies, Field::Category).is_empty());
        assert!(group_by_field(&companies, Field::Status).is_empty());
        assert!(count_by_registration_year(&companies).is_empty());
    }

    #[test]
    fn test_counts_cover_every_non_null_record() {
        let companies = sample();

        for field in Field::ALL {
            assert_eq!(total(&count_by_field(&companies, field)), companies.len());
        }

        let with_date = companies
            .iter()
            .filter(|c| c.date_of_registration.is_some())
            .count();
        assert_eq!(total(&count_by_registration_year(&companies)), with_date);
    }

    #[test]
    fn test_registration_year_skips_missing_dates() {
        let companies = sample();
        let table = count_by_registration_year(&companies);

        assert_eq!(table.len(), 3);
        assert_eq!(table[&1991], 2);
        assert_eq!(table[&2005], 1);
        assert_eq!(table[&2019], 1);
    }

    #[test]
    fn test_count_is_order_independent() {
        let companies = sample();
        let forward = count_by_field(&companies, Field::Status);
        let backward = count_by_field(companies.iter().rev(), Field::Status);
        assert_eq!(forward, backward);
        assert_eq!(forward, count_by_field(&companies, Field::Status));
    }

    #[test]
    fn test_group_by_places_each_record_once() {
        let companies = sample();
        let groups = group_by_field(&companies, Field::Status);

        let active: Vec<&str> = groups["active"].iter().map(|c| c.cin.as_str()).collect();
        assert_eq!(active, vec!["C1", "C2", "C5"]);

        for company in &companies {
            let hits = groups
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m.cin == company.cin))
                .map(|(key, _)| *key)
                .collect::<Vec<_>>();
            assert_eq!(hits, vec![company.status.as_str()]);
        }
    }

    #[test]
    fn test_generic_count_consumes_lazy_iterator() {
        let years = (0..10).map(|i| if i % 3 == 0 { None } else { Some(2000 + i % 2) });
        let table = count_by(years, |year: &Option<i32>| *year);

        assert_eq!(table[&2000], 3);
        assert_eq!(table[&2001], 3);
    }

    #[test]
    fn test_group_by_owned_records() {
        let groups = group_by(sample(), |company: &Company| company.registration_year());

        assert_eq!(groups[&1991].len(), 2);
        assert!(groups.values().flatten().all(|c| c.cin != "C2"));
    }
}
