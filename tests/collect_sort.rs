// tests/collect_sort.rs
mod common;

use common::{FakeSite, school_page, student_page};
use natiga::config::consts::TOTAL_LABEL;
use natiga::config::options::ScrapeOptions;
use natiga::core::net::Method;
use natiga::error::{ScrapeError, StudentRef};
use natiga::progress::Progress;
use natiga::scrape::collect;

fn totals(collection: &natiga::scrape::Collection) -> Vec<String> {
    collection
        .results
        .records()
        .iter()
        .map(|r| r.info.get(TOTAL_LABEL).unwrap_or("").to_string())
        .collect()
}

#[test]
fn seats_are_sorted_by_total_descending() {
    let fake = FakeSite::new().with_student(1, "10.5").with_student(2, "99").with_student(3, "42");
    let scrape = ScrapeOptions::new(vec![1, 2, 3], vec![]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);
    assert_eq!(totals(&collection), vec!["99", "42", "10.5"]);
}

#[test]
fn arabic_indic_totals_sort_numerically() {
    let fake = FakeSite::new().with_student(1, "٩٠").with_student(2, "٣٩٥٫٥").with_student(3, "100");
    let scrape = ScrapeOptions::new(vec![1, 2, 3], vec![]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);
    assert_eq!(totals(&collection), vec!["٣٩٥٫٥", "100", "٩٠"]);
}

#[test]
fn invalid_seat_is_recorded_and_run_goes_on() {
    let fake = FakeSite::new().with_student(1, "10").with_student(3, "30");
    let scrape = ScrapeOptions::new(vec![1, 2, 3], vec![]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);
    assert_eq!(collection.results.len(), 2);
    assert_eq!(collection.errors.len(), 1);
    assert!(matches!(collection.errors[0], ScrapeError::InvalidStudent { id: StudentRef::Seat(2), .. }));
}

#[test]
fn schools_run_before_seats_and_all_are_merged() {
    let a = "http://natiga.test/school.php?id=1";
    let b = "http://natiga.test/school.php?id=2";
    let fake = FakeSite::new()
        .with_school(a, &[&[(11, "200"), (12, "150")]])
        .with_school(b, &[&[(21, "390"), (22, "50")]])
        .with_student(7, "300");
    let scrape = ScrapeOptions::new(vec![7], vec![a.to_string(), b.to_string()]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);

    assert_eq!(totals(&collection), vec!["390", "300", "200", "150", "50"]);
    let reqs = fake.requests();
    assert_eq!(reqs[0].method, Method::Post);
    assert_eq!(reqs.last().map(|r| r.link.clone()), Some(FakeSite::seat_link(7)));
}

#[test]
fn duplicate_inputs_are_fetched_once() {
    let fake = FakeSite::new().with_student(1, "10");
    let scrape = ScrapeOptions::new(vec![1, 1, 1], vec![]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);
    assert_eq!(collection.results.len(), 1);
    assert_eq!(fake.requests().len(), 1);
}

#[test]
fn differently_shaped_student_is_dropped() {
    // Two info rows with one label collapse into one column.
    let odd = student_page("Odd", 2, "50").replace(">info5<", ">info4<");
    let fake = FakeSite::new()
        .with_student(1, "10")
        .with_page(&FakeSite::seat_link(2), odd)
        .with_student(3, "30");
    let scrape = ScrapeOptions::new(vec![1, 2, 3], vec![]);
    let collection = collect(&scrape, &FakeSite::site(), &fake, None);
    assert_eq!(collection.results.len(), 2);
    assert!(matches!(
        collection.errors[0],
        ScrapeError::ShapeMismatch { id: StudentRef::Seat(2), expected: 30, found: 29 }
    ));
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(label.to_string());
    }
    fn item_failed(&mut self, label: &str) {
        self.failed.push(label.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn progress_sees_every_input() {
    let school = "http://natiga.test/school.php?id=1";
    let fake = FakeSite::new().with_school(school, &[&[(11, "200")]]).with_student(1, "10");
    let scrape = ScrapeOptions::new(vec![1, 2], vec![school.to_string()]);
    let mut rec = Recorder::default();
    collect(&scrape, &FakeSite::site(), &fake, Some(&mut rec));
    assert_eq!(rec.total, 3);
    assert_eq!(rec.done, vec![school.to_string(), String::from("1")]);
    assert_eq!(rec.failed, vec![String::from("2")]);
    assert!(rec.finished);
}

#[test]
fn school_cut_short_still_counts_as_done() {
    let school = "http://natiga.test/school.php?id=1";
    let hrefs = vec![String::from("index.php?t=num&k=11")];
    // page 1 promises two pages; page 2 is missing
    let fake = FakeSite::new()
        .with_listing(school, 1, school_page(&hrefs, 2))
        .with_student(11, "200");
    let dead_school = "http://natiga.test/school.php?id=404";
    let scrape = ScrapeOptions::new(vec![], vec![school.to_string(), dead_school.to_string()]);
    let mut rec = Recorder::default();
    let collection = collect(&scrape, &FakeSite::site(), &fake, Some(&mut rec));

    assert_eq!(collection.results.len(), 1);
    assert_eq!(collection.errors.len(), 2);
    assert!(matches!(collection.errors[0], ScrapeError::InvalidSchool { .. }));
    assert_eq!(rec.done, vec![school.to_string()]);
    assert_eq!(rec.failed, vec![dead_school.to_string()]);
}
