//! FAQ Entity

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN, TEXT_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: u32,
    pub index: u32,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
}

impl Entity for Faq {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Faq {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for FaqDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .required("question", &self.question, NAME_MAX_LEN)
            .required("answer", &self.answer, TEXT_MAX_LEN)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = FaqDraft {
            question: form.text("question"),
            answer: form.text("answer"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("question", self.question.clone())
            .with("answer", self.answer.clone())
    }
}

impl Resource for Faq {
    const COLLECTION: &'static str = "faqs";
    const LABEL: &'static str = "FAQ";

    type Draft = FaqDraft;

    fn from_draft(id: u32, index: u32, draft: &FaqDraft) -> Self {
        Faq {
            id,
            index,
            question: draft.question.clone(),
            answer: draft.answer.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &FaqDraft) {
        self.question = draft.question.clone();
        self.answer = draft.answer.clone();
    }

    fn to_draft(&self) -> FaqDraft {
        FaqDraft {
            question: self.question.clone(),
            answer: self.answer.clone(),
        }
    }
}
