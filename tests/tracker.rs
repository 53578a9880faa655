use pocketgtd::repositories::{ContextRepository, ProjectRepository, TaskRepository};
use pocketgtd::storage::LocalStorage;
use pocketgtd::tracker::{Tracker, TrackerError};

async fn tracker() -> Tracker {
    Tracker::new(LocalStorage::in_memory().await.unwrap())
}

async fn task_count(tracker: &Tracker) -> u64 {
    TaskRepository::count(&tracker.storage().conn).await.unwrap()
}

#[tokio::test]
async fn test_adding_tasks_increases_count() {
    let tracker = tracker().await;
    for text in ["foo", "foo <school>", "foo [context]"] {
        let before = task_count(&tracker).await;
        tracker.add_task(text).await.unwrap();
        assert_eq!(task_count(&tracker).await, before + 1);
    }
}

#[tokio::test]
async fn test_ids_follow_insertion_order() {
    let tracker = tracker().await;
    for (i, text) in ["a", "b", "c"].iter().enumerate() {
        let task = tracker.add_task(text).await.unwrap();
        assert_eq!(task.id, i as i32 + 1);
    }
}

#[tokio::test]
async fn test_removed_ids_are_not_reused() {
    let tracker = tracker().await;
    tracker.add_task("a").await.unwrap();
    tracker.add_task("b").await.unwrap();
    tracker.remove_task(2).await.unwrap();

    let task = tracker.add_task("c").await.unwrap();
    assert_eq!(task.id, 3);
    assert_eq!(tracker.list_tasks().await.unwrap(), vec!["1. a", "3. c"]);
}

#[tokio::test]
async fn test_add_task_links_project_and_context() {
    let tracker = tracker().await;
    let task = tracker.add_task(" do the foo < protocol 4 > [context]").await.unwrap();
    assert_eq!(task.description, "do the foo");

    let conn = &tracker.storage().conn;
    let project = ProjectRepository::get_by_name(conn, "protocol 4").await.unwrap().unwrap();
    let context = ContextRepository::get_by_name(conn, "context").await.unwrap().unwrap();
    assert_eq!(task.project_id, Some(project.id));
    assert_eq!(task.context_id, Some(context.id));
    let linked = ContextRepository::get_by_id(conn, context.id).await.unwrap().unwrap();
    assert_eq!(linked.name, "context");

    assert_eq!(
        tracker.list_tasks().await.unwrap(),
        vec!["1. do the foo <protocol 4> [context]"]
    );
}

#[tokio::test]
async fn test_repeated_project_tag_reuses_record() {
    let tracker = tracker().await;
    tracker.add_task("x <P>").await.unwrap();
    tracker.add_task("y <P>").await.unwrap();

    let projects = ProjectRepository::get_all(&tracker.storage().conn).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(
        tracker.list_tasks_for_project("P").await.unwrap(),
        vec!["1. x <P>", "2. y <P>"]
    );
}

#[tokio::test]
async fn test_project_names_are_case_sensitive() {
    let tracker = tracker().await;
    tracker.add_task("x <Home>").await.unwrap();
    tracker.add_task("y <home>").await.unwrap();

    let projects = ProjectRepository::get_all(&tracker.storage().conn).await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(tracker.list_tasks_for_project("home").await.unwrap(), vec!["2. y <home>"]);
}

#[tokio::test]
async fn test_project_and_context_namespaces_are_separate() {
    let tracker = tracker().await;
    tracker.add_task("paint <home>").await.unwrap();
    tracker.add_task("nap [home]").await.unwrap();

    assert_eq!(tracker.list_tasks_for_project("home").await.unwrap(), vec!["1. paint <home>"]);
    assert_eq!(tracker.list_tasks_for_context("home").await.unwrap(), vec!["2. nap [home]"]);
}

#[tokio::test]
async fn test_list_tasks_for_project_limits_to_project() {
    let tracker = tracker().await;
    let conn = &tracker.storage().conn;
    let foo = ProjectRepository::find_or_create(conn, "foo").await.unwrap();
    let bar = ProjectRepository::find_or_create(conn, "bar").await.unwrap();

    TaskRepository::create(conn, "apple", Some(foo.id), None).await.unwrap();
    TaskRepository::create(conn, "banana", Some(bar.id), None).await.unwrap();
    TaskRepository::create(conn, "strawberry", None, None).await.unwrap();
    TaskRepository::create(conn, "pear", Some(foo.id), None).await.unwrap();

    assert_eq!(
        tracker.list_tasks_for_project("foo").await.unwrap(),
        vec!["1. apple <foo>", "4. pear <foo>"]
    );
}

#[tokio::test]
async fn test_list_tasks_for_context_limits_to_context() {
    let tracker = tracker().await;
    let conn = &tracker.storage().conn;
    let foo = ContextRepository::find_or_create(conn, "foo").await.unwrap();
    let bar = ContextRepository::find_or_create(conn, "bar").await.unwrap();

    TaskRepository::create(conn, "apple", None, Some(foo.id)).await.unwrap();
    TaskRepository::create(conn, "banana", None, Some(bar.id)).await.unwrap();
    TaskRepository::create(conn, "strawberry", None, None).await.unwrap();
    TaskRepository::create(conn, "pear", None, Some(foo.id)).await.unwrap();

    assert_eq!(
        tracker.list_tasks_for_context("foo").await.unwrap(),
        vec!["1. apple [foo]", "4. pear [foo]"]
    );
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let tracker = tracker().await;
    let err = tracker.list_tasks_for_project("nowhere").await.unwrap_err();
    assert!(matches!(err, TrackerError::ProjectNotFound(ref name) if name == "nowhere"));
    assert!(err.is_not_found());

    let err = tracker.list_tasks_for_context("nowhere").await.unwrap_err();
    assert!(matches!(err, TrackerError::ContextNotFound(_)));
}

#[tokio::test]
async fn test_known_project_without_tasks_is_empty() {
    let tracker = tracker().await;
    tracker.add_task("x <solo>").await.unwrap();
    tracker.remove_task(1).await.unwrap();

    // The project outlives its last task.
    assert!(tracker.list_tasks_for_project("solo").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_tasks_empty() {
    let tracker = tracker().await;
    assert!(tracker.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_tasks_until_empty() {
    let tracker = tracker().await;
    tracker.add_task("foo").await.unwrap();
    tracker.add_task("bar").await.unwrap();

    tracker.remove_task(2).await.unwrap();
    assert_eq!(task_count(&tracker).await, 1);
    tracker.remove_task(1).await.unwrap();
    assert_eq!(task_count(&tracker).await, 0);
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() {
    let tracker = tracker().await;
    tracker.add_task("foo").await.unwrap();
    tracker.remove_task(99).await.unwrap();
    tracker.remove_task(0).await.unwrap();
    assert_eq!(task_count(&tracker).await, 1);
}

#[tokio::test]
async fn test_dump_gives_bare_descriptions() {
    let tracker = tracker().await;
    tracker.add_task("a <p>").await.unwrap();
    tracker.add_task("b").await.unwrap();
    tracker.add_task("c [home]").await.unwrap();
    assert_eq!(tracker.dump().await.unwrap(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_dump_to_file_writes_one_line_per_task() {
    let tracker = tracker().await;
    for text in ["foo", "bar", "baz"] {
        tracker.add_task(text).await.unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo.txt");
    let dumped = tracker.dump_to_file(&path).await.unwrap();

    assert_eq!(dumped, vec!["foo", "bar", "baz"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo\nbar\nbaz\n");
}

#[tokio::test]
async fn test_import_creates_one_task_per_line() {
    let tracker = tracker().await;
    let created = tracker.import("apple\nbanana\nstrawberry\npeanuts\n").await.unwrap();
    assert_eq!(created, 4);
    assert_eq!(task_count(&tracker).await, 4);

    let conn = &tracker.storage().conn;
    for (i, expected) in ["apple", "banana", "strawberry", "peanuts"].iter().enumerate() {
        let task = TaskRepository::get_by_id(conn, i as i32 + 1).await.unwrap().unwrap();
        assert_eq!(task.description, *expected);
    }
}

#[tokio::test]
async fn test_import_keeps_tags_verbatim() {
    let tracker = tracker().await;
    tracker.import("call mom <family> [phone]\r\nplain\n").await.unwrap();

    assert_eq!(tracker.dump().await.unwrap(), vec!["call mom <family> [phone]", "plain"]);
    let conn = &tracker.storage().conn;
    assert!(ProjectRepository::get_all(conn).await.unwrap().is_empty());
    assert!(ContextRepository::get_all(conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_destroy_all_clears_everything_and_restarts_ids() {
    let tracker = tracker().await;
    tracker.add_task("foo <p> [c]").await.unwrap();
    tracker.add_task("bar").await.unwrap();
    tracker.add_task("baz").await.unwrap();

    tracker.destroy_all().await.unwrap();

    let conn = &tracker.storage().conn;
    assert_eq!(task_count(&tracker).await, 0);
    assert!(ProjectRepository::get_all(conn).await.unwrap().is_empty());
    assert!(ContextRepository::get_all(conn).await.unwrap().is_empty());

    let task = tracker.add_task("fresh <p>").await.unwrap();
    assert_eq!(task.id, 1);
    let project = ProjectRepository::get_by_id(conn, task.project_id.unwrap()).await.unwrap().unwrap();
    assert_eq!(project.id, 1);
}

#[tokio::test]
async fn test_tags_only_task_has_empty_description() {
    let tracker = tracker().await;
    tracker.add_task("<work> [office]").await.unwrap();
    assert_eq!(tracker.list_tasks().await.unwrap(), vec!["1.  <work> [office]"]);
}
