//! Creation behavior: default persistence and custom create hooks.

use grappelli::prelude::*;
use rstest::rstest;

fn define_blog(prefix: &str) -> (String, String) {
	let user_model = format!("{prefix}.User");
	let post_model = format!("{prefix}.Post");
	let user_factory = format!("{prefix}_user");
	let post_factory = format!("{prefix}_post");

	register_model(ModelSchema::new(user_model.clone()));
	register_model(
		ModelSchema::new(post_model.clone())
			.column(format!("{user_factory}_id"), ColumnType::Integer)
			.belongs_to_model(user_factory.clone(), user_model.clone()),
	);

	define_factory(
		FactoryDefinition::builder(user_factory.clone())
			.model(user_model)
			.build(),
	)
	.unwrap();
	define_factory(
		FactoryDefinition::builder(post_factory.clone())
			.model(post_model)
			.association(user_factory.clone())
			.build(),
	)
	.unwrap();

	(user_factory, post_factory)
}

#[rstest]
fn created_instance_saves() {
	let (_, post_factory) = define_blog("create_saves");

	let post = create(&post_factory).unwrap();
	assert!(!post.is_new_record());
	assert!(post.pk().is_some());
}

#[rstest]
fn created_instance_assigns_and_saves_associations() {
	let (user_factory, post_factory) = define_blog("create_assoc");

	let post = create(&post_factory).unwrap();
	let user = post.association(&user_factory).unwrap();

	assert_eq!(user.model(), "create_assoc.User");
	assert!(!user.is_new_record());
	assert_eq!(post.get(&format!("{user_factory}_id")), user.pk());
}

#[rstest]
fn custom_create_hook_is_used_instead_of_save() {
	// No model schema registered: the hook fully replaces the save path,
	// so the store is never consulted.
	define_factory(
		FactoryDefinition::builder("create_hooked_user")
			.to_create(|user| {
				user.mark_persisted();
				Ok(())
			})
			.build(),
	)
	.unwrap();

	let user = create("create_hooked_user").unwrap();
	assert!(!user.is_new_record());
}

#[rstest]
fn persisted_predicate_reflects_only_the_hook() {
	define_factory(
		FactoryDefinition::builder("create_noop_user")
			.to_create(|_| Ok(()))
			.build(),
	)
	.unwrap();

	let user = create("create_noop_user").unwrap();
	assert!(user.is_new_record());
}

#[rstest]
fn create_in_saves_through_the_given_store() {
	register_model(ModelSchema::new("create_in.Widget").column("name", ColumnType::Text));
	define_factory(
		FactoryDefinition::builder("create_in_widget")
			.model("create_in.Widget")
			.attribute("name", "gadget")
			.build(),
	)
	.unwrap();

	let store = MemoryStore::new();
	let widget = create_in("create_in_widget", &store).unwrap();

	assert!(!widget.is_new_record());
	assert_eq!(store.count("create_in.Widget"), 1);

	let rows = store.rows("create_in.Widget");
	assert_eq!(rows[0]["name"], serde_json::json!("gadget"));
}

#[rstest]
fn association_rows_reach_the_store() {
	let (user_factory, post_factory) = define_blog("create_rows");
	let store = MemoryStore::new();

	let post = create_in(&post_factory, &store).unwrap();
	let user = post.association(&user_factory).unwrap();

	assert_eq!(store.count("create_rows.User"), 1);
	assert_eq!(store.count("create_rows.Post"), 1);

	let rows = store.rows("create_rows.Post");
	assert_eq!(rows[0].get("create_rows_user_id"), user.pk());
}
