use chrono::{DateTime, NaiveDate, Utc};
use lyralink_core::model::bucket::{BucketCategory, BucketItem, BUCKET_SCHEMA};
use lyralink_core::model::letter::{Letter, LETTERS_SCHEMA};
use lyralink_core::model::milestone::{Milestone, MilestoneIcon, MILESTONES_SCHEMA};
use lyralink_core::model::quiz::{QuizQuestion, BLANK_OPTION, QUIZ_SCHEMA};
use lyralink_core::model::reason::{Reason, REASONS_SCHEMA};
use lyralink_core::{KeyValueStore, ListRecord, ListStore, MemoryStore};
use serde_json::Value;

fn reasons(store: &MemoryStore) -> Vec<Reason> {
    ListStore::new(store).load(&REASONS_SCHEMA, Reason::seed)
}

#[test]
fn missing_key_loads_seed_without_writing() {
    let store = MemoryStore::new();
    let loaded = reasons(&store);

    assert_eq!(loaded, Reason::seed());
    assert!(store.keys().is_empty());
}

#[test]
fn malformed_json_loads_seed() {
    let store = MemoryStore::new();
    store.set(REASONS_SCHEMA.key, "{not json").unwrap();
    assert_eq!(reasons(&store), Reason::seed());

    store.set(REASONS_SCHEMA.key, r#"{"id":"x"}"#).unwrap();
    assert_eq!(reasons(&store), Reason::seed());
}

#[test]
fn save_then_load_round_trips() {
    let store = MemoryStore::new();
    let lists = ListStore::new(&store);
    let mut items = BucketItem::seed();
    items.truncate(2);
    items[0].completed = true;

    assert!(lists.save(BUCKET_SCHEMA.key, &items));
    let loaded: Vec<BucketItem> = lists.load(&BUCKET_SCHEMA, Vec::new);
    assert_eq!(loaded, items);
}

#[test]
fn empty_stored_list_stays_empty() {
    let store = MemoryStore::new();
    store.set(REASONS_SCHEMA.key, "[]").unwrap();
    assert!(reasons(&store).is_empty());
}

#[test]
fn legacy_reason_strings_migrate_and_old_key_is_kept() {
    let store = MemoryStore::new();
    let legacy = r#"["Your laugh", "Your kindness", 17]"#;
    store.set("lyra_reasons_v2", legacy).unwrap();

    let loaded = reasons(&store);

    let texts: Vec<&str> = loaded.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Your laugh", "Your kindness"]);
    assert_ne!(loaded[0].id, loaded[1].id);
    assert_eq!(store.get("lyra_reasons_v2").unwrap().as_deref(), Some(legacy));

    let stored: Vec<Reason> =
        serde_json::from_str(&store.get(REASONS_SCHEMA.key).unwrap().unwrap()).unwrap();
    assert_eq!(stored, loaded);
    assert_eq!(reasons(&store), loaded);
}

#[test]
fn legacy_bucket_items_gain_life_category() {
    let store = MemoryStore::new();
    store
        .set(
            "lyra_bucket_v2",
            r#"[{"id":"1","text":"See the aurora","completed":true},
                {"id":"2","text":"Learn to surf","completed":false,"category":"adventure"}]"#,
        )
        .unwrap();

    let loaded: Vec<BucketItem> = ListStore::new(&store).load(&BUCKET_SCHEMA, BucketItem::seed);

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].category, BucketCategory::Life);
    assert!(loaded[0].completed);
    assert_eq!(loaded[1].category, BucketCategory::Adventure);
    assert!(store.get(BUCKET_SCHEMA.key).unwrap().is_some());
}

#[test]
fn current_key_wins_over_legacy_key() {
    let store = MemoryStore::new();
    store.set("lyra_reasons_v2", r#"["old"]"#).unwrap();
    store
        .set(REASONS_SCHEMA.key, r#"[{"id":"r1","text":"new"}]"#)
        .unwrap();

    let loaded = reasons(&store);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].text, "new");
}

#[test]
fn coercion_drops_invalid_and_duplicate_entries() {
    let store = MemoryStore::new();
    store
        .set(
            MILESTONES_SCHEMA.key,
            r#"[
                {"id":"a","date":"2026-01-01","title":"Kept","story":"first"},
                {"id":"a","date":"2026-01-02","title":"Duplicate","story":"dup"},
                {"id":"b","date":"not-a-date","title":"Bad date","story":"x"},
                {"id":"c","date":"2026-01-03","title":"   ","story":"blank title"},
                "stray string",
                {"date":"2026-01-04","title":"No id","story":"gets one"}
            ]"#,
        )
        .unwrap();

    let loaded: Vec<Milestone> =
        ListStore::new(&store).load(&MILESTONES_SCHEMA, Milestone::seed);

    let titles: Vec<&str> = loaded.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Kept", "No id"]);
    assert!(!loaded[1].id.is_empty());
}

#[test]
fn saved_blob_uses_camel_case_keys() {
    let store = MemoryStore::new();
    let lists = ListStore::new(&store);
    let mut items = BucketItem::seed();
    items[0].completed = true;
    items[0].completed_at = Some(items[0].created_at);
    lists.save(BUCKET_SCHEMA.key, &items);

    let raw: Value = serde_json::from_str(&store.get(BUCKET_SCHEMA.key).unwrap().unwrap()).unwrap();
    assert!(raw[0].get("completedAt").is_some());
    assert!(raw[0].get("createdAt").is_some());
    assert!(raw[1].get("completedAt").is_none());
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn legacy_milestones_with_blank_dates_are_kept() {
    let store = MemoryStore::new();
    let legacy = r#"[
        {"id":"1","date":"2025-12-23","title":"The Day We Connected","story":"First ping.","icon":"star"},
        {"id":"1700000000000","date":"","title":"Our first call","story":"Three hours.","icon":"heart"},
        {"date":"2026-01-01","title":"New Year","story":"Together."}
    ]"#;
    store.set("lyra_milestones", legacy).unwrap();

    let loaded: Vec<Milestone> =
        ListStore::new(&store).load(&MILESTONES_SCHEMA, Milestone::seed);

    let titles: Vec<&str> = loaded.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Day We Connected", "Our first call", "New Year"]);
    assert_eq!(loaded[0].id, "1");
    assert_eq!(loaded[0].date, date(2025, 12, 23));
    assert_eq!(loaded[0].icon, MilestoneIcon::Star);
    assert_eq!(loaded[1].id, "1700000000000");
    assert_eq!(loaded[1].date, date(2023, 11, 14));
    assert!(!loaded[2].id.is_empty());
    assert_eq!(loaded[2].icon, MilestoneIcon::Heart);
    assert!(loaded.iter().all(|m| m.created_at == DateTime::<Utc>::UNIX_EPOCH));

    assert_eq!(store.get("lyra_milestones").unwrap().as_deref(), Some(legacy));
    let stored: Vec<Milestone> =
        serde_json::from_str(&store.get(MILESTONES_SCHEMA.key).unwrap().unwrap()).unwrap();
    assert_eq!(stored, loaded);
}

#[test]
fn legacy_letters_migrate_in_order() {
    let store = MemoryStore::new();
    let legacy = r#"[
        {"id":"1739500000000","title":"Our Future","date":"2026-02-14","content":"Happy Valentine's Day.","sealed":false},
        {"id":"1","date":"2025-12-25","title":"Why I Love You","content":"Dearest Lyraa,\n\nYou are my home."}
    ]"#;
    store.set("lyra_letters", legacy).unwrap();

    let loaded: Vec<Letter> = ListStore::new(&store).load(&LETTERS_SCHEMA, Letter::seed);

    let ids: Vec<&str> = loaded.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["1739500000000", "1"]);
    assert_eq!(loaded[0].date, date(2026, 2, 14));
    assert_eq!(loaded[1].content, "Dearest Lyraa,\n\nYou are my home.");
    assert!(!loaded[1].sealed);
    assert_eq!(loaded[1].created_at, DateTime::<Utc>::UNIX_EPOCH);

    assert_eq!(store.get("lyra_letters").unwrap().as_deref(), Some(legacy));
    assert!(store.get(LETTERS_SCHEMA.key).unwrap().is_some());
    assert_eq!(ListStore::new(&store).load(&LETTERS_SCHEMA, Letter::seed), loaded);
}

#[test]
fn legacy_quiz_questions_without_ids_gain_unique_ids() {
    let store = MemoryStore::new();
    let legacy = r#"[
        {"question":"Where did Yuki and Lyraa first exchange signals (met)?",
         "options":["Instagram","A cozy cafe","Game","University Library"],
         "answer":"Game",
         "context":"It started with a single ping in MLBB Global Chat that changed everything."},
        {"question":"What is the secret access code to Yuki's heart?",
         "options":["Lyraa","Coffee","Gaming"," "],
         "answer":"Lyraa",
         "context":"Access granted."}
    ]"#;
    store.set("lyra_quiz_questions", legacy).unwrap();

    let loaded: Vec<QuizQuestion> = ListStore::new(&store).load(&QUIZ_SCHEMA, QuizQuestion::seed);

    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|q| !q.id.is_empty()));
    assert_ne!(loaded[0].id, loaded[1].id);
    assert_eq!(loaded[0].answer, "Game");
    assert_eq!(loaded[0].options[2], "Game");
    assert_eq!(loaded[1].options[3], BLANK_OPTION);
    assert!(loaded[1].is_correct("Lyraa"));
    assert!(loaded.iter().all(|q| q.created_at == DateTime::<Utc>::UNIX_EPOCH));

    assert_eq!(store.get("lyra_quiz_questions").unwrap().as_deref(), Some(legacy));
    let stored: Vec<QuizQuestion> =
        serde_json::from_str(&store.get(QUIZ_SCHEMA.key).unwrap().unwrap()).unwrap();
    assert_eq!(stored, loaded);
}
