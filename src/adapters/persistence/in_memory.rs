//! In-memory implementation of the quiz repository.
//!
//! Backs tests and local development. Each call holds the store lock for
//! its duration, so individual operations are atomic; the assembly-level
//! ordering guarantee is documented on `QuizAssembler`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{
    AnswerOptionId, DomainError, ErrorCode, QuestionId, QuizId, ResponseId, ResultTypeId,
};
use crate::domain::quiz::{
    AnswerOption, NewAnswerOption, NewQuestion, NewQuiz, NewResponse, NewResultType, Question,
    Quiz, QuizResponse, QuizStatus, ResultType, ScoringMapping,
};
use crate::ports::QuizRepository;

#[derive(Debug, Default)]
struct Store {
    quizzes: HashMap<QuizId, Quiz>,
    questions: HashMap<QuestionId, Question>,
    options: HashMap<AnswerOptionId, AnswerOption>,
    result_types: HashMap<ResultTypeId, ResultType>,
    mappings: Vec<ScoringMapping>,
    mapping_pairs: HashSet<(AnswerOptionId, ResultTypeId)>,
    responses: HashMap<ResponseId, QuizResponse>,
}

/// In-memory quiz repository.
#[derive(Debug, Default)]
pub struct InMemoryQuizRepository {
    store: Mutex<Store>,
}

impl InMemoryQuizRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Test support: number of stored scoring rows.
    pub fn scoring_mapping_count(&self) -> usize {
        self.lock().mappings.len()
    }

    /// Test support: number of stored responses.
    pub fn response_count(&self) -> usize {
        self.lock().responses.len()
    }

    /// Test support: the quiz's questions ordered by `sort_order`.
    pub fn questions_for_quiz(&self, quiz_id: QuizId) -> Vec<Question> {
        let store = self.lock();
        let mut questions: Vec<Question> = store
            .questions
            .values()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.sort_order);
        questions
    }

    /// Test support: a question's options ordered by `sort_order`.
    pub fn options_for_question(&self, question_id: QuestionId) -> Vec<AnswerOption> {
        let store = self.lock();
        let mut options: Vec<AnswerOption> = store
            .options
            .values()
            .filter(|o| o.question_id == question_id)
            .cloned()
            .collect();
        options.sort_by_key(|o| o.sort_order);
        options
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<Quiz, DomainError> {
        let mut store = self.lock();
        if store.quizzes.values().any(|q| q.slug == quiz.slug) {
            return Err(DomainError::new(
                ErrorCode::DuplicateSlug,
                format!("Slug '{}' is already taken", quiz.slug),
            ));
        }

        let record = Quiz {
            id: QuizId::new(),
            slug: quiz.slug,
            title: quiz.title,
            description: quiz.description,
            status: quiz.status,
            concept: quiz.concept,
            created_at: Utc::now(),
        };
        store.quizzes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DomainError> {
        let mut store = self.lock();
        if !store.quizzes.contains_key(&question.quiz_id) {
            return Err(DomainError::quiz_not_found(question.quiz_id));
        }

        let record = Question {
            id: QuestionId::new(),
            quiz_id: question.quiz_id,
            sort_order: question.sort_order,
            text: question.text,
            question_type: question.question_type,
            insight: question.insight,
        };
        store.questions.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_answer_option(
        &self,
        option: NewAnswerOption,
    ) -> Result<AnswerOption, DomainError> {
        let mut store = self.lock();
        if !store.questions.contains_key(&option.question_id) {
            return Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("Question '{}' not found", option.question_id),
            ));
        }

        let record = AnswerOption {
            id: AnswerOptionId::new(),
            question_id: option.question_id,
            sort_order: option.sort_order,
            text: option.text,
        };
        store.options.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_result_type(
        &self,
        result_type: NewResultType,
    ) -> Result<ResultType, DomainError> {
        let mut store = self.lock();
        if !store.quizzes.contains_key(&result_type.quiz_id) {
            return Err(DomainError::quiz_not_found(result_type.quiz_id));
        }

        let record = ResultType {
            id: ResultTypeId::new(),
            quiz_id: result_type.quiz_id,
            sort_order: result_type.sort_order,
            name: result_type.name,
            description: result_type.description,
            recommendation_detail: result_type.recommendation_detail,
            colour: result_type.colour,
        };
        store.result_types.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_scoring_mapping(&self, mapping: ScoringMapping) -> Result<(), DomainError> {
        let mut store = self.lock();
        let pair = (mapping.answer_option_id, mapping.result_type_id);
        if !store.mapping_pairs.insert(pair) {
            return Err(DomainError::new(
                ErrorCode::DuplicateMapping,
                format!(
                    "Option '{}' already maps to result type '{}'",
                    mapping.answer_option_id, mapping.result_type_id
                ),
            ));
        }
        store.mappings.push(mapping);
        Ok(())
    }

    async fn insert_response(&self, response: NewResponse) -> Result<QuizResponse, DomainError> {
        let mut store = self.lock();
        if !store.quizzes.contains_key(&response.quiz_id) {
            return Err(DomainError::quiz_not_found(response.quiz_id));
        }

        let record = QuizResponse {
            id: ResponseId::new(),
            quiz_id: response.quiz_id,
            result_type_id: response.result_type_id,
            respondent_email: response.respondent_email,
            answers: response.answers,
            submitted_at: Utc::now(),
        };
        store.responses.insert(record.id, record.clone());
        Ok(record)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.lock().quizzes.values().any(|q| q.slug == slug))
    }

    async fn find_quiz(&self, id: QuizId) -> Result<Option<Quiz>, DomainError> {
        Ok(self.lock().quizzes.get(&id).cloned())
    }

    async fn find_quiz_by_slug(&self, slug: &str) -> Result<Option<Quiz>, DomainError> {
        Ok(self
            .lock()
            .quizzes
            .values()
            .find(|q| q.slug == slug)
            .cloned())
    }

    async fn update_quiz_status(&self, id: QuizId, status: QuizStatus) -> Result<(), DomainError> {
        let mut store = self.lock();
        match store.quizzes.get_mut(&id) {
            Some(quiz) => {
                quiz.status = status;
                Ok(())
            }
            None => Err(DomainError::quiz_not_found(id)),
        }
    }

    async fn result_types_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<ResultType>, DomainError> {
        let store = self.lock();
        let mut types: Vec<ResultType> = store
            .result_types
            .values()
            .filter(|rt| rt.quiz_id == quiz_id)
            .cloned()
            .collect();
        types.sort_by_key(|rt| rt.sort_order);
        Ok(types)
    }

    async fn mappings_for_options(
        &self,
        option_ids: &[AnswerOptionId],
    ) -> Result<Vec<ScoringMapping>, DomainError> {
        let wanted: HashSet<&AnswerOptionId> = option_ids.iter().collect();
        Ok(self
            .lock()
            .mappings
            .iter()
            .filter(|m| wanted.contains(&m.answer_option_id))
            .copied()
            .collect())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::QuestionType;

    fn new_quiz(slug: &str) -> NewQuiz {
        NewQuiz {
            slug: slug.to_string(),
            title: "My Quiz".to_string(),
            description: "A quiz about you.".to_string(),
            status: QuizStatus::Draft,
            concept: None,
        }
    }

    #[tokio::test]
    async fn insert_returns_record_with_generated_id() {
        let repo = InMemoryQuizRepository::new();
        let quiz = repo.insert_quiz(new_quiz("my-quiz")).await.unwrap();
        assert_eq!(quiz.slug, "my-quiz");
        assert_eq!(
            repo.find_quiz(quiz.id).await.unwrap().unwrap().title,
            "My Quiz"
        );
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let repo = InMemoryQuizRepository::new();
        repo.insert_quiz(new_quiz("my-quiz")).await.unwrap();
        let err = repo.insert_quiz(new_quiz("my-quiz")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSlug);
        assert!(repo.slug_exists("my-quiz").await.unwrap());
        assert!(!repo.slug_exists("other").await.unwrap());
    }

    #[tokio::test]
    async fn question_requires_existing_quiz() {
        let repo = InMemoryQuizRepository::new();
        let err = repo
            .insert_question(NewQuestion {
                quiz_id: QuizId::new(),
                sort_order: 0,
                text: "Q?".to_string(),
                question_type: QuestionType::SingleChoice,
                insight: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::QuizNotFound);
    }

    #[tokio::test]
    async fn duplicate_mapping_pair_is_rejected() {
        let repo = InMemoryQuizRepository::new();
        let mapping = ScoringMapping {
            answer_option_id: AnswerOptionId::new(),
            result_type_id: ResultTypeId::new(),
            weight: 2,
        };
        repo.insert_scoring_mapping(mapping).await.unwrap();
        let err = repo.insert_scoring_mapping(mapping).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateMapping);
        assert_eq!(repo.scoring_mapping_count(), 1);
    }

    #[tokio::test]
    async fn result_types_come_back_in_sort_order() {
        let repo = InMemoryQuizRepository::new();
        let quiz = repo.insert_quiz(new_quiz("ordered")).await.unwrap();
        for sort_order in [2u32, 0, 1] {
            repo.insert_result_type(NewResultType {
                quiz_id: quiz.id,
                sort_order,
                name: format!("RT{sort_order}"),
                description: "A result type for ordering checks.".to_string(),
                recommendation_detail: None,
                colour: None,
            })
            .await
            .unwrap();
        }
        let types = repo.result_types_for_quiz(quiz.id).await.unwrap();
        let orders: Vec<u32> = types.iter().map(|rt| rt.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn mappings_for_options_filters_by_set() {
        let repo = InMemoryQuizRepository::new();
        let selected = AnswerOptionId::new();
        let other = AnswerOptionId::new();
        let rt = ResultTypeId::new();
        repo.insert_scoring_mapping(ScoringMapping {
            answer_option_id: selected,
            result_type_id: rt,
            weight: 3,
        })
        .await
        .unwrap();
        repo.insert_scoring_mapping(ScoringMapping {
            answer_option_id: other,
            result_type_id: rt,
            weight: 1,
        })
        .await
        .unwrap();

        let rows = repo.mappings_for_options(&[selected]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].answer_option_id, selected);
    }
}
