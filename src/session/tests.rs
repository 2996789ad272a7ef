use super::*;

fn sample_bank() -> QuestionBank {
    let csv = "question,type,optionA,optionB,optionC,optionD,correctAnswer,points\n\
               \"Q1\",multiple_choice,\"Red\",\"Blue\",,,\"B\",1\n\
               \"Q2\",true_false,,,,,false,1\n\
               \"Q3\",multiple_choice,\"Yes\",\"No\",\"Maybe\",,\"A\",2\n";
    QuestionBank::from_csv(csv).unwrap().0
}

fn session(mode: SelectionMode) -> QuizSession {
    QuizSession::new(sample_bank(), mode, GradeSettings::default())
}

#[test]
fn in_order_session_presents_bank_order() {
    let session = session(SelectionMode::InOrder);
    for position in 0..session.len() {
        let (index, question) = session.question_at(position).unwrap();
        assert_eq!(index, position);
        assert_eq!(question.text, format!("Q{}", position + 1));
    }
}

#[test]
fn shuffled_session_is_a_permutation() {
    let session = session(SelectionMode::Shuffled);
    let mut indices: Vec<usize> = (0..session.len())
        .map(|position| session.question_at(position).unwrap().0)
        .collect();
    indices.sort();
    assert_eq!(indices, [0, 1, 2]);
}

#[test]
fn answers_cannot_be_changed_once_recorded() {
    let mut session = session(SelectionMode::InOrder);
    assert!(session.record_answer(0, "B").is_ok());
    assert!(session.record_answer(0, "A").is_err());
    assert_eq!(session.answers().response(0), Some("B"));
}

#[test]
fn unknown_question_index_is_rejected() {
    let mut session = session(SelectionMode::InOrder);
    assert!(session.record_answer(17, "B").is_err());
}

#[test]
fn submit_grades_the_recorded_answers() {
    let mut session = session(SelectionMode::InOrder);
    session.record_answer(0, "B").unwrap();
    session.record_answer(1, "false").unwrap();
    session.record_answer(2, "B").unwrap();
    assert!(session.is_complete());

    let result = session.submit().unwrap();
    assert_eq!(result.earned_points, 2);
    assert_eq!(result.total_points, 4);
    assert_eq!(result.percentage, 50);
    assert!(!result.passed);
}

#[test]
fn retake_starts_with_empty_answers() {
    let mut session = session(SelectionMode::InOrder);
    session.record_answer(0, "B").unwrap();

    let retake = session.retake();
    assert!(retake.answers().is_empty());
    assert_eq!(retake.len(), session.len());
}

#[test]
fn pool_rejects_duplicate_names() {
    let pool = SessionPool::default();
    pool.start("weekly-drill", session(SelectionMode::InOrder))
        .unwrap();
    assert!(pool
        .start("weekly-drill", session(SelectionMode::InOrder))
        .is_err());
}

#[test]
fn pool_hands_out_live_sessions() {
    let pool = SessionPool::default();
    pool.start("weekly-drill", session(SelectionMode::InOrder))
        .unwrap();

    {
        let handle = pool.get("weekly-drill").unwrap();
        handle.lock().record_answer(0, "B").unwrap();
    }

    let handle = pool.get("weekly-drill").unwrap();
    assert_eq!(handle.lock().answers().len(), 1);
}

#[test]
fn ended_sessions_are_gone_from_the_pool() {
    let pool = SessionPool::default();
    pool.start("weekly-drill", session(SelectionMode::InOrder))
        .unwrap();
    assert!(pool.end("weekly-drill").is_some());
    assert!(pool.get("weekly-drill").is_none());
}
