use std::fs;

use encyclopedia::services::page_service::FIELDS_REQUIRED;
use encyclopedia::{EntryForm, EntryStore, FileEntryStore, FormView, Outcome, PageService, View};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn store_with(entries: &[(&str, &str)]) -> (TempDir, FileEntryStore) {
    let dir = TempDir::new().unwrap();
    for (title, content) in entries {
        fs::write(dir.path().join(format!("{title}.md")), content).unwrap();
    }
    let store = FileEntryStore::open(dir.path()).unwrap();
    (dir, store)
}

fn message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Render(View::Message { message, .. }) => message,
        other => panic!("expected a message, got {other:?}"),
    }
}

fn view_message(view: View) -> String {
    message(Outcome::Render(view))
}

#[test]
fn view_renders_stored_markdown() {
    let (_dir, store) = store_with(&[("Python", "# Python\nA language.")]);
    let pages = PageService::new(&store);

    match pages.view("Python").unwrap() {
        View::Entry { title, html, modified } => {
            assert_eq!(title, "Python");
            assert!(html.contains("<h1>Python</h1>"));
            assert!(html.contains("<p>A language.</p>"));
            assert!(modified.is_some());
        }
        other => panic!("expected entry view, got {other:?}"),
    }

    assert_eq!(
        view_message(pages.view("Ruby").unwrap()),
        "The page 'Ruby' was not found."
    );
}

#[test]
fn list_returns_all_titles_and_empty_store_lists_nothing() {
    let (_dir, store) = store_with(&[("HTML", ""), ("CSS", ""), ("JavaScript", "")]);
    assert_eq!(
        PageService::new(&store).list().unwrap(),
        View::Index {
            entries: vec!["CSS".into(), "HTML".into(), "JavaScript".into()]
        }
    );

    let (_dir, empty) = store_with(&[]);
    assert_eq!(
        PageService::new(&empty).list().unwrap(),
        View::Index { entries: vec![] }
    );
}

#[test]
fn search_follows_the_exact_hit_rule() {
    let (_dir, store) = store_with(&[("CSS", ""), ("HTML", ""), ("JavaScript", "")]);
    let pages = PageService::new(&store);

    assert_eq!(pages.search("html").unwrap(), Outcome::Redirect("HTML".into()));
    assert_eq!(
        pages.search("scri").unwrap(),
        Outcome::Render(View::Search {
            query: "scri".into(),
            matches: vec!["JavaScript".into()],
        })
    );
    assert_eq!(
        pages.search("S").unwrap(),
        Outcome::Render(View::Search {
            query: "S".into(),
            matches: vec!["CSS".into(), "JavaScript".into()],
        })
    );
    assert_eq!(message(pages.search("rust").unwrap()), "No page found for 'rust'.");
    assert!(matches!(
        pages.search("").unwrap(),
        Outcome::Render(View::Index { entries }) if entries.len() == 3
    ));
}

#[test]
fn create_then_view() {
    let (_dir, store) = store_with(&[]);
    let pages = PageService::new(&store);

    let outcome = pages.create(&EntryForm::new("Rust", "# Rust\nFast *and* safe.")).unwrap();
    assert_eq!(outcome, Outcome::Redirect("Rust".into()));

    match pages.view("Rust").unwrap() {
        View::Entry { html, .. } => assert!(html.contains("<p>Fast <em>and</em> safe.</p>")),
        other => panic!("expected entry view, got {other:?}"),
    }
}

#[test]
fn create_existing_title_is_a_conflict() {
    let (_dir, store) = store_with(&[("Git", "original")]);
    let pages = PageService::new(&store);

    let outcome = pages.create(&EntryForm::new("Git", "replacement")).unwrap();
    assert_eq!(message(outcome), "A page with the title 'Git' already exists.");
    assert_eq!(store.get_entry("Git").unwrap().as_deref(), Some("original"));
}

#[test]
fn create_requires_both_fields_and_keeps_input() {
    let (_dir, store) = store_with(&[]);
    let pages = PageService::new(&store);

    let form = EntryForm {
        title: Some("Django".into()),
        content: Some("   ".into()),
    };
    assert_eq!(
        pages.create(&form).unwrap(),
        Outcome::Render(View::Create(FormView {
            title: "Django".into(),
            content: "   ".into(),
            error: Some(FIELDS_REQUIRED.into()),
        }))
    );

    let missing_title = EntryForm {
        title: None,
        content: Some("body".into()),
    };
    assert!(matches!(
        pages.create(&missing_title).unwrap(),
        Outcome::Render(View::Create(FormView { error: Some(_), .. }))
    ));
    assert!(store.list_entries().unwrap().is_empty());
}

#[test]
fn create_rejects_path_like_titles() {
    let (dir, store) = store_with(&[]);
    let pages = PageService::new(&store);

    match pages.create(&EntryForm::new("../escape", "x")).unwrap() {
        Outcome::Render(View::Create(form)) => {
            assert_eq!(form.title, "../escape");
            assert!(form.error.unwrap().contains("cannot be used as a title"));
        }
        other => panic!("expected create form, got {other:?}"),
    }
    assert!(!dir.path().parent().unwrap().join("escape.md").exists());
}

#[test]
fn overlong_titles_are_messages_not_failures() {
    let (_dir, store) = store_with(&[]);
    let pages = PageService::new(&store);
    let long = "a".repeat(300);

    assert_eq!(
        view_message(pages.view(&long).unwrap()),
        format!("The page '{long}' was not found.")
    );
    assert_eq!(
        view_message(pages.edit_form(&long).unwrap()),
        format!("The page '{long}' does not exist and cannot be edited.")
    );
    match pages.create(&EntryForm::new(&long, "x")).unwrap() {
        Outcome::Render(View::Create(form)) => {
            assert_eq!(form.title, long);
            assert!(form.error.unwrap().contains("cannot be used as a title"));
        }
        other => panic!("expected create form, got {other:?}"),
    }
    assert!(store.list_entries().unwrap().is_empty());
}

#[test]
fn path_titles_are_trimmed() {
    let (_dir, store) = store_with(&[("Python", "# Python")]);
    let pages = PageService::new(&store);

    assert!(matches!(
        pages.view("Python ").unwrap(),
        View::Entry { title, .. } if title == "Python"
    ));
    assert!(matches!(
        pages.edit_form(" Python").unwrap(),
        View::Edit { target, .. } if target == "Python"
    ));

    let outcome = pages.edit("Python ", &EntryForm::new("Python", "new")).unwrap();
    assert_eq!(outcome, Outcome::Redirect("Python".into()));
    assert_eq!(store.get_entry("Python").unwrap().as_deref(), Some("new"));
    assert_eq!(store.list_entries().unwrap(), vec!["Python"]);
}

#[test]
fn edit_form_prefills_original() {
    let (_dir, store) = store_with(&[("CSS", "# CSS")]);
    let pages = PageService::new(&store);

    assert_eq!(
        pages.edit_form("CSS").unwrap(),
        View::Edit {
            target: "CSS".into(),
            form: FormView {
                title: "CSS".into(),
                content: "# CSS".into(),
                error: None,
            },
        }
    );
    assert_eq!(
        view_message(pages.edit_form("COBOL").unwrap()),
        "The page 'COBOL' does not exist and cannot be edited."
    );
}

#[test]
fn edit_in_place_replaces_content() {
    let (_dir, store) = store_with(&[("CSS", "# CSS")]);
    let pages = PageService::new(&store);

    let outcome = pages.edit("CSS", &EntryForm::new("CSS", "# CSS\nStyles.")).unwrap();
    assert_eq!(outcome, Outcome::Redirect("CSS".into()));
    assert_eq!(store.get_entry("CSS").unwrap().as_deref(), Some("# CSS\nStyles."));
}

#[test]
fn edit_with_missing_field_shows_original_values() {
    let (_dir, store) = store_with(&[("CSS", "# CSS")]);
    let pages = PageService::new(&store);

    let form = EntryForm {
        title: Some("Cascading".into()),
        content: None,
    };
    assert_eq!(
        pages.edit("CSS", &form).unwrap(),
        Outcome::Render(View::Edit {
            target: "CSS".into(),
            form: FormView {
                title: "CSS".into(),
                content: "# CSS".into(),
                error: Some(FIELDS_REQUIRED.into()),
            },
        })
    );
}

#[test]
fn edit_of_missing_entry_is_refused() {
    let (_dir, store) = store_with(&[]);
    let outcome = PageService::new(&store)
        .edit("Ghost", &EntryForm::new("Ghost", "boo"))
        .unwrap();
    assert_eq!(message(outcome), "The page 'Ghost' does not exist and cannot be edited.");
    assert!(store.list_entries().unwrap().is_empty());
}

#[test]
fn edit_with_new_title_moves_the_entry() {
    let (_dir, store) = store_with(&[("Pyhton", "typo"), ("Git", "")]);
    let pages = PageService::new(&store);

    let outcome = pages.edit("Pyhton", &EntryForm::new("Python", "# Python")).unwrap();
    assert_eq!(outcome, Outcome::Redirect("Python".into()));
    assert_eq!(store.list_entries().unwrap(), vec!["Git", "Python"]);
    assert_eq!(store.get_entry("Python").unwrap().as_deref(), Some("# Python"));
    assert_eq!(store.get_entry("Pyhton").unwrap(), None);
}

#[test]
fn failed_rename_keeps_the_original_entry() {
    let (dir, store) = store_with(&[("Pyhton", "typo")]);
    fs::create_dir(dir.path().join("Python.md")).unwrap();
    let pages = PageService::new(&store);

    assert!(pages.edit("Pyhton", &EntryForm::new("Python", "# Python")).is_err());
    assert_eq!(store.get_entry("Pyhton").unwrap().as_deref(), Some("typo"));
}

#[test]
fn edit_refuses_to_rename_onto_another_entry() {
    let (_dir, store) = store_with(&[("Python", "py"), ("Git", "git")]);
    let pages = PageService::new(&store);

    match pages.edit("Python", &EntryForm::new("Git", "new")).unwrap() {
        Outcome::Render(View::Edit { target, form }) => {
            assert_eq!(target, "Python");
            assert_eq!(form.title, "Git");
            assert_eq!(form.content, "new");
            assert_eq!(
                form.error.as_deref(),
                Some("A page with the title 'Git' already exists.")
            );
        }
        other => panic!("expected edit form, got {other:?}"),
    }
    assert_eq!(store.get_entry("Git").unwrap().as_deref(), Some("git"));
    assert_eq!(store.get_entry("Python").unwrap().as_deref(), Some("py"));
}

#[test]
fn random_is_deterministic_for_a_seed_and_covers_the_store() {
    let titles = ["CSS", "Django", "Git", "HTML", "Python"];
    let entries: Vec<(&str, &str)> = titles.iter().map(|t| (*t, "")).collect();
    let (_dir, store) = store_with(&entries);
    let pages = PageService::new(&store);

    let picks = |seed: u64| -> Vec<Outcome> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20).map(|_| pages.random(&mut rng).unwrap()).collect()
    };
    let first = picks(42);
    assert_eq!(first, picks(42));

    let mut seen: Vec<String> = first
        .into_iter()
        .map(|outcome| match outcome {
            Outcome::Redirect(title) => title,
            other => panic!("expected redirect, got {other:?}"),
        })
        .collect();
    assert!(seen.iter().all(|t| titles.contains(&t.as_str())));
    seen.sort();
    seen.dedup();
    assert!(seen.len() > 1);
}

#[test]
fn random_on_empty_store_explains_itself() {
    let (_dir, store) = store_with(&[]);
    let mut rng = StdRng::seed_from_u64(1);
    let outcome = PageService::new(&store).random(&mut rng).unwrap();
    assert_eq!(message(outcome), "There are no pages yet, so there is no page to pick.");
}
