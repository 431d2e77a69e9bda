//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, GroupInfo};
use crate::directive::{parse_question, Directive};
use crate::domain::{Difficulty, Problem, ProblemType, ProgressData, ScoreData, SessionData, Settings};
use crate::scoring::{ResultsSummary, Submission};
use crate::session::{phase, AnswerOutcome, Phase};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// Starts a test; without settings the saved (or default) ones are used.
    StartTest {
        #[serde(default)]
        settings: Option<Settings>,
    },
    SubmitAnswer {
        #[serde(rename = "problemId")]
        problem_id: String,
        answer: Submission,
    },
    Navigate {
        index: usize,
    },
    Finish,
    Retake,
    GetSession,
    Reset,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        session: SessionOut,
    },
    AnswerResult {
        #[serde(flatten)]
        outcome: AnswerOutcome,
    },
    Results {
        results: ResultsSummary,
    },
    Error {
        message: String,
    },
}

/// A problem as served to clients: the stored record plus the question split
/// into display text and renderer directive.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemOut {
    #[serde(flatten)]
    pub problem: Problem,
    pub display_question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,
}

pub fn to_out(p: &Problem) -> ProblemOut {
    let parsed = parse_question(&p.question);
    ProblemOut {
        problem: p.clone(),
        display_question: parsed.display,
        directive: parsed.directive,
    }
}

/// Current test state. Everything but `phase` is absent in `setup`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_score: Option<ScoreData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<ProblemOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_problem_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<usize>,
    /// Filled once the test is finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsSummary>,
}

pub fn to_session_out(session: Option<&SessionData>) -> SessionOut {
    let phase = phase(session);
    match session {
        None => SessionOut {
            phase,
            current_score: None,
            problems: Vec::new(),
            current_problem_index: None,
            settings: None,
            start_time: None,
            total_marks: None,
            results: None,
        },
        Some(s) => SessionOut {
            phase,
            current_score: Some(s.current_score.clone()),
            problems: s.problems.iter().map(to_out).collect(),
            current_problem_index: Some(s.current_problem_index),
            settings: Some(s.settings.clone()),
            start_time: Some(s.start_time),
            total_marks: Some(s.total_marks),
            results: s.is_completed.then(|| crate::session::summarize(s)),
        },
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ProblemQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomProblemIn {
    pub enabled_types: Vec<ProblemType>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueProblemsIn {
    pub enabled_types: Vec<ProblemType>,
    pub quantity: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct ProblemsOut {
    pub problems: Vec<ProblemOut>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartIn {
    #[serde(default)]
    pub settings: Option<Settings>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub answer: Submission,
}

#[derive(Debug, Deserialize)]
pub struct NavigateIn {
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct CatalogOut {
    pub types: Vec<CatalogEntry>,
    pub groups: Vec<GroupInfo>,
}

#[derive(Debug, Serialize)]
pub struct ProgressOut {
    pub progress: Option<ProgressData>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionType;

    fn clock_problem() -> Problem {
        Problem {
            id: "c".into(),
            kind: ProblemType::ReviewClockReading,
            original_type: None,
            question: "[CLOCK:7:30] Đồng hồ chỉ mấy giờ?".into(),
            answer: 450,
            text_answer: Some("7 giờ 30 phút".into()),
            text_options: Some(vec!["7 giờ 30 phút".into()]),
            options: None,
            question_type: QuestionType::MultipleChoice,
            is_answered: false,
            user_answer: None,
            user_text_answer: None,
            is_correct: None,
        }
    }

    #[test]
    fn problem_out_keeps_raw_question_and_adds_display() {
        let v = serde_json::to_value(to_out(&clock_problem())).unwrap();
        assert_eq!(v["question"], "[CLOCK:7:30] Đồng hồ chỉ mấy giờ?");
        assert_eq!(v["displayQuestion"], "Đồng hồ chỉ mấy giờ?");
        assert_eq!(v["directive"]["kind"], "clock");
        assert_eq!(v["directive"]["minute"], 30);
        assert_eq!(v["type"], "review_clock_reading");
    }

    #[test]
    fn ws_messages_parse_by_type_tag() {
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"submit_answer","problemId":"p1","answer":"Đ"}"#).unwrap();
        match m {
            ClientWsMessage::SubmitAnswer { problem_id, answer } => {
                assert_eq!(problem_id, "p1");
                assert_eq!(answer, Submission::Text("Đ".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"start_test"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::StartTest { settings: None }));
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"submit_answer","problemId":"p","answer":12}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::SubmitAnswer { answer: Submission::Number(12), .. }));
    }

    #[test]
    fn setup_session_is_just_a_phase() {
        let v = serde_json::to_value(to_session_out(None)).unwrap();
        assert_eq!(v, serde_json::json!({ "phase": "setup" }));
    }

    #[test]
    fn answer_result_is_flattened() {
        let msg = ServerWsMessage::AnswerResult {
            outcome: AnswerOutcome {
                problem_id: "p".into(),
                correct: true,
                score: ScoreData { correct: 1, total: 1, streak: 1, best_streak: 1 },
                expected: "12".into(),
            },
        };
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "answer_result");
        assert_eq!(v["problemId"], "p");
        assert_eq!(v["score"]["bestStreak"], 1);
    }
}
