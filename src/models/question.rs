//! Question model.

use crate::client::PretixClient;
use crate::collection::EntityCollection;
use crate::entity::plain_entity;
use crate::error::Result;
use crate::models::{Event, Organizer};
use crate::pagination::ListOptions;
use crate::reference::{impl_ref_from, Identifier, Identify, Ref};
use crate::schema::{entity_fields, field_table, FieldSpec};
use crate::traits::List;

/// Answer option of a choice question.
pub const OPTION: &[FieldSpec] = field_table! {
    id: Integer,
    position: Integer,
    identifier: String,
    answer: MultiLingual,
};

plain_entity!(
    /// A user-defined question asked during checkout or check-in.
    Question,
    "Question"
);

entity_fields! {
    Question {
        id: Integer,
        /// The field label shown to the customer.
        question: MultiLingual,
        help_text: MultiLingual,
        /// The expected type of answer.
        question_type = "type": String,
        required: Boolean,
        position: Integer,
        /// IDs of the items this question is assigned to.
        items: ListOfIntegers,
        identifier: String,
        ask_during_checkin: Boolean,
        hidden: Boolean,
        print_on_invoice: Boolean,
        options: ObjectList(OPTION),
        dependency_question: Integer,
        dependency_values: ListOfStrings,
        /// Deprecated single-value form of `dependency_values`.
        dependency_value: String,
    }
}

impl_ref_from!(Question);

impl Identify for Question {
    fn identifier(&self) -> Result<Identifier> {
        super::by_id(self)
    }
}

impl List for Question {
    /// Organizer and event slugs.
    type Scope = (String, String);

    fn collection_path(_client: &PretixClient, scope: &(String, String)) -> Result<String> {
        let (organizer, event) = scope;
        Ok(format!(
            "organizers/{}/events/{}/questions/",
            urlencoding::encode(organizer),
            urlencoding::encode(event)
        ))
    }
}

impl PretixClient {
    /// Questions of an event, possibly under another organizer.
    pub async fn get_questions<'a, 'b>(
        &self,
        organizer: impl Into<Ref<&'a Organizer>>,
        event: impl Into<Ref<&'b Event>>,
    ) -> Result<EntityCollection<Question>> {
        let scope = (organizer.into().slug()?, event.into().slug()?);
        Question::list(self, scope, &ListOptions::default()).await
    }
}
