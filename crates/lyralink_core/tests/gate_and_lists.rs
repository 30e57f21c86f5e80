use chrono::{NaiveDate, TimeZone, Utc};
use lyralink_core::model::bucket::BucketCategory;
use lyralink_core::model::letter::LetterDraft;
use lyralink_core::model::milestone::MilestoneDraft;
use lyralink_core::model::quiz::QuizDraft;
use lyralink_core::model::reason::REASONS_SCHEMA;
use lyralink_core::service::bucket::{BucketList, CategoryFilter, StatusFilter};
use lyralink_core::service::letters::LetterArchive;
use lyralink_core::service::quiz::QuizBook;
use lyralink_core::service::reasons::ReasonList;
use lyralink_core::service::timeline::Timeline;
use lyralink_core::{Clock, FixedClock, Gate, KeyValueStore, MemoryStore};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
}

#[test]
fn add_then_remove_restores_the_list() {
    let store = MemoryStore::new();
    let mut bucket = BucketList::open(&store, clock());
    let before = bucket.items().to_vec();

    let id = bucket.add("Visit the moon", CategoryFilter::All).unwrap();
    assert_eq!(bucket.items()[0].text, "Visit the moon");
    assert_eq!(bucket.items()[0].category, BucketCategory::Life);
    assert_eq!(bucket.items().len(), before.len() + 1);

    let removed = Gate.unlock("y121l", |pass| bucket.remove(&id, pass));
    assert_eq!(removed, Some(true));
    assert_eq!(bucket.items(), before.as_slice());

    let reopened = BucketList::open(&store, clock());
    assert_eq!(reopened.items(), before.as_slice());
}

#[test]
fn wrong_secret_never_reaches_remove() {
    let store = MemoryStore::new();
    let mut reasons = ReasonList::open(&store, clock());
    let first = reasons.reasons()[0].id.clone();

    let outcome = Gate.unlock("wrong", |pass| reasons.remove(&first, pass));

    assert!(outcome.is_none());
    assert_eq!(reasons.len(), 9);
    assert!(store.get(REASONS_SCHEMA.key).unwrap().is_none());
}

#[test]
fn blank_add_leaves_list_and_storage_untouched() {
    let store = MemoryStore::new();
    let mut reasons = ReasonList::open(&store, clock());

    assert!(reasons.add("   \n\t").is_none());
    assert_eq!(reasons.len(), 9);
    assert!(store.keys().is_empty());
}

#[test]
fn removing_unknown_id_writes_nothing() {
    let store = MemoryStore::new();
    let mut letters = LetterArchive::open(&store, clock());

    let removed = Gate.unlock("y121l", |pass| letters.remove("missing", pass));

    assert_eq!(removed, Some(false));
    assert!(store.keys().is_empty());
}

#[test]
fn reasons_delete_by_id_after_migration() {
    let store = MemoryStore::new();
    store
        .set("lyra_reasons_v2", r#"["same words", "same words", "other"]"#)
        .unwrap();
    let mut reasons = ReasonList::open(&store, clock());
    assert_eq!(reasons.len(), 3);

    let second = reasons.reasons()[1].id.clone();
    Gate.unlock("y121l", |pass| reasons.remove(&second, pass));

    let texts: Vec<&str> = reasons.reasons().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["same words", "other"]);
}

#[test]
fn new_reason_goes_to_the_front() {
    let store = MemoryStore::new();
    let mut reasons = ReasonList::open(&store, clock());

    reasons.add("  The way you  hum ").unwrap();

    assert_eq!(reasons.reasons()[0].text, "The way you hum");
    assert_eq!(reasons.reasons()[0].created_at, clock().now());
}

#[test]
fn timeline_keeps_date_order() {
    let store = MemoryStore::new();
    let mut timeline = Timeline::open(&store, clock());

    timeline
        .add(&MilestoneDraft {
            date: NaiveDate::from_ymd_opt(2025, 12, 24),
            title: "Christmas Eve call".to_string(),
            story: "We stayed up until sunrise.".to_string(),
        })
        .unwrap();
    timeline
        .add(&MilestoneDraft {
            date: None,
            title: "Today".to_string(),
            story: "Still here.".to_string(),
        })
        .unwrap();

    let titles: Vec<&str> = timeline.milestones().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "The Day We Connected",
            "Christmas Eve call",
            "First Deep Conversation",
            "New Year, New Connection",
            "Today",
        ]
    );
    assert_eq!(
        timeline.milestones()[4].date,
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    );
}

#[test]
fn new_letter_is_dated_today_and_unsealed() {
    let store = MemoryStore::new();
    let mut letters = LetterArchive::open(&store, clock());

    let id = letters
        .add(&LetterDraft {
            title: "Good morning".to_string(),
            content: "Line one\n\nLine two".to_string(),
        })
        .unwrap();

    let letter = letters.get(&id).unwrap();
    assert_eq!(letters.letters()[0].id, id);
    assert_eq!(letter.date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    assert!(!letter.sealed);
    assert_eq!(letter.content, "Line one\n\nLine two");
}

#[test]
fn quiz_questions_append_and_reject_bad_drafts() {
    let store = MemoryStore::new();
    let mut quiz = QuizBook::open(&store, clock());
    let draft = QuizDraft {
        question: "Favorite hero?".to_string(),
        options: [
            "Lunox".to_string(),
            "Angela".to_string(),
            "Ling".to_string(),
            "Chou".to_string(),
        ],
        correct_index: 1,
        context: "Healer main forever.".to_string(),
    };

    let id = quiz.add(&draft).unwrap();
    assert_eq!(quiz.questions().last().unwrap().id, id);
    assert_eq!(quiz.questions().last().unwrap().answer, "Angela");

    let missing_context = QuizDraft {
        context: " ".to_string(),
        ..draft
    };
    assert!(quiz.add(&missing_context).is_none());
    assert_eq!(quiz.questions().len(), 6);
}

#[test]
fn bucket_filters_and_completion_percentage() {
    let store = MemoryStore::new();
    let mut bucket = BucketList::open(&store, clock());
    let travel = bucket.items()[0].id.clone();

    assert_eq!(bucket.toggle(&travel), Some(true));
    assert_eq!(bucket.toggle("missing"), None);

    assert_eq!(bucket.completion_percentage(StatusFilter::All, CategoryFilter::All), 25);
    assert_eq!(
        bucket.completion_percentage(
            StatusFilter::All,
            CategoryFilter::Only(BucketCategory::Travel)
        ),
        100
    );
    assert_eq!(
        bucket.completion_percentage(
            StatusFilter::Active,
            CategoryFilter::Only(BucketCategory::Travel)
        ),
        0
    );
    assert_eq!(bucket.visible(StatusFilter::Completed, CategoryFilter::All).len(), 1);
    assert_eq!(
        bucket.section(BucketCategory::Life, StatusFilter::Active).len(),
        2
    );

    let reopened = BucketList::open(&store, clock());
    assert!(reopened.items()[0].completed);
    assert!(reopened.items()[0].completed_at.is_some());
}
