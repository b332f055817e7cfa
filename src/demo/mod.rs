//! Contacts demo API.
//!
//! # Data Flow
//! ```text
//! main.rs / tests
//!     → ContactStore::seeded(), EventLog::new()   (explicit construction)
//!     → contacts_api(prefix, store, events)        (routes + hooks)
//!     → HttpServer::new(config, api)
//! ```
//!
//! # Design Decisions
//! - State is injected by cloning handles into handler closures; there is no
//!   global data
//! - Every executed route is logged by an after-hook, and `GetContactsQuery`
//!   executions are counted by a typed after-hook

pub mod functions;
pub mod models;
pub mod store;

use crate::routing::ApiBuilder;

use self::functions::{add_numbers, calculate, hello};
use self::models::{
    CreateContactCommand, DeleteContactBySearchCommand, DeleteContactCommand, GetContactByIdQuery,
    GetContactsQuery, SearchContactsQuery, UpdateContactCommand,
};

pub use self::store::{ContactStore, EventLog};

/// Declare the contacts API under `prefix`.
pub fn contacts_api(prefix: &str, store: ContactStore, events: EventLog) -> ApiBuilder {
    let all = store.clone();
    let search = store.clone();
    let by_id = store.clone();
    let create = store.clone();
    let update = store.clone();
    let delete_matching = store.clone();
    let delete = store;
    let listed = events.clone();
    let counted = events.clone();
    let logged = events.clone();

    ApiBuilder::new(prefix)
        .get("/hello", hello)
        .get("/add/{number1}/{number2}", add_numbers)
        .get("/calculate/{operator}", calculate)
        .get_async("/contacts", move |_: GetContactsQuery| {
            let store = all.clone();
            async move { store.all() }
        })
        .get("/contacts/search", move |q: SearchContactsQuery| search.search(&q.value))
        .get("/contacts/{id}", move |q: GetContactByIdQuery| by_id.find(q.id))
        .post("/contacts", move |c: CreateContactCommand| create.create(c.name))
        .put("/contacts", move |c: UpdateContactCommand| update.update(c.id, c.name))
        .delete("/contacts/search", move |c: DeleteContactBySearchCommand| {
            delete_matching.delete_matching(&c.value)
        })
        .delete("/contacts/{id}", move |c: DeleteContactCommand| delete.delete(c.id))
        .get("/events", move || listed.events())
        .get("/count", move || counted.contact_queries())
        .after_each(move |record| {
            let event = record
                .input_type_name()
                .map_or_else(|| record.path().to_string(), str::to_string);
            tracing::debug!(event = %event, "Route executed");
            logged.record(event);
            Ok(())
        })
        .after_each_for::<GetContactsQuery, _>(move |_| {
            events.count_contact_query();
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::describe;
    use crate::routing::HttpVerb;

    #[test]
    fn test_demo_routes_are_declared_in_order() {
        let api = contacts_api("/api", ContactStore::seeded(), EventLog::new());
        let ids: Vec<_> = api
            .registry()
            .all()
            .iter()
            .map(|route| describe(api.prefix(), route).operation_id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "ApiHelloGet",
                "ApiAddByNumber1ByNumber2Get",
                "ApiCalculateByOperatorGet",
                "ApiContactsGet",
                "ApiContactsSearchGet",
                "ApiContactsByIdGet",
                "ApiContactsPost",
                "ApiContactsPut",
                "ApiContactsSearchDelete",
                "ApiContactsByIdDelete",
                "ApiEventsGet",
                "ApiCountGet",
            ]
        );
        assert_eq!(api.hooks().hooks(crate::hooks::HookPhase::After).len(), 2);
        assert!(api.registry().find(HttpVerb::Post, "/contacts").unwrap().binds_body());
    }
}
