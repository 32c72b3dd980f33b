//! Application state and screen transitions
//!
//! Everything here is terminal-free: key actions go in, [`Effect`]s come
//! out, and the [`App`](super::App) performs the effects that need I/O.

use std::time::Instant;

use super::input::Action;
use crate::catalog::{self, Chapter, ChapterSelection};
use crate::history::{ResultStore, TestResult};
use crate::quiz::{
    Advance, Countdown, CountdownHandle, OPTION_COUNT, QuizSession, ScoreCard, SessionError, Subject,
    TestType,
};
use crate::supply::SupplyRequest;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    ChapterSelect,
    Loading,
    Quiz,
    Results,
    History,
}

/// Entries of the dashboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    FullTest,
    StatementTest,
    PyqMarathon,
    MixedPractice,
    ChapterSelection,
    History,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        Self::FullTest,
        Self::StatementTest,
        Self::PyqMarathon,
        Self::MixedPractice,
        Self::ChapterSelection,
        Self::History,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTest => "Start Full Test",
            Self::StatementTest => "NTA Statement Test",
            Self::PyqMarathon => "PYQ Marathon",
            Self::MixedPractice => "Mixed Practice",
            Self::ChapterSelection => "Chapter Selection",
            Self::History => "History & Analysis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FullTest => "Full-length mock across the whole syllabus.",
            Self::StatementTest => "Correct/incorrect statement logic from NCERT lines.",
            Self::PyqMarathon => "Previous year questions with their years.",
            Self::MixedPractice => "Random high-yield topics to test overall preparedness.",
            Self::ChapterSelection => "Pick specific weak chapters to build mastery.",
            Self::History => "Average accuracy per subject and past attempts.",
        }
    }
}

/// Something the app must do in response to an action
#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    /// Request questions and start an attempt
    Generate(SupplyRequest),
    /// The attempt was finalized and should be stored
    Finished(QuizSession),
}

/// Status line message
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub is_error: bool,
}

impl StatusLine {
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Chapter picker state
#[derive(Debug, Clone, Default)]
pub struct ChapterPicker {
    pub cursor: usize,
    pub selection: ChapterSelection,
}

/// Question generation in flight
#[derive(Debug, Clone)]
pub struct LoadingState {
    pub request: SupplyRequest,
    pub started: Instant,
    /// Characters generated so far
    pub generated_chars: usize,
    /// Where to go back to if generation fails
    pub return_to: Screen,
}

/// A live attempt and its countdown
///
/// The countdown task lives exactly as long as this value.
#[derive(Debug)]
pub struct QuizScreen {
    pub session: QuizSession,
    pub countdown: CountdownHandle,
    /// Highlighted option for cursor selection
    pub option_cursor: usize,
    /// First press of a two-press action, waiting for the second
    pub confirm: Option<Confirm>,
    /// Question number typed so far, applied on Enter
    pub jump_input: String,
}

/// Quiz actions that need a second press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Leave without saving
    Exit,
    /// Finalize and score the attempt
    Submit,
}

impl QuizScreen {
    pub fn new(session: QuizSession, seconds_per_question: u64) -> Self {
        let countdown =
            CountdownHandle::start(Countdown::for_questions(session.len(), seconds_per_question));
        let option_cursor = session.current_answer().unwrap_or(0);
        Self { session, countdown, option_cursor, confirm: None, jump_input: String::new() }
    }

    fn sync_cursor(&mut self) {
        self.option_cursor = self.session.current_answer().unwrap_or(0);
    }

    /// Append a digit to the pending question number
    ///
    /// Digits that would name a question past the end are ignored.
    fn push_jump_digit(&mut self, digit: u8) {
        let mut typed = self.jump_input.clone();
        typed.push(char::from(b'0' + digit));
        match typed.parse::<usize>() {
            Ok(n) if n <= self.session.len() && typed != "0" => self.jump_input = typed,
            _ => {}
        }
    }

    /// Move to the typed question (1-based) and clear the buffer
    fn apply_jump(&mut self) -> Result<(), SessionError> {
        let typed = std::mem::take(&mut self.jump_input);
        let Ok(number) = typed.parse::<usize>() else {
            return Ok(());
        };
        self.session.go_to(number.saturating_sub(1))?;
        self.sync_cursor();
        Ok(())
    }
}

/// A finished attempt being reviewed
#[derive(Debug, Clone)]
pub struct ReviewState {
    pub result: TestResult,
    /// Recomputed from the snapshot, never read from stored fields
    pub card: ScoreCard,
    pub scroll: usize,
    pub return_to: Screen,
}

impl ReviewState {
    pub fn new(result: TestResult, return_to: Screen) -> Self {
        let card = result.rescore();
        Self { result, card, scroll: 0, return_to }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub subject: Subject,
    pub menu_cursor: usize,
    pub chapters: ChapterPicker,
    pub loading: Option<LoadingState>,
    pub quiz: Option<QuizScreen>,
    pub review: Option<ReviewState>,
    /// Selected row in the history list (newest first)
    pub history_cursor: usize,
    pub status: StatusLine,
    pub question_count: usize,
    pub seconds_per_question: u64,
}

impl AppState {
    pub fn new(question_count: usize, seconds_per_question: u64) -> Self {
        Self { question_count, seconds_per_question, ..Default::default() }
    }

    /// Chapters listed in the picker for the current subject
    pub fn visible_chapters(&self) -> Vec<&'static Chapter> {
        catalog::chapters_for(self.subject)
    }

    /// Handle one key action
    pub fn handle_action(&mut self, action: Action, store: &ResultStore) -> Effect {
        if action != Action::Back && self.screen != Screen::Quiz {
            self.status.clear();
        }

        match self.screen {
            Screen::Dashboard => self.on_dashboard(action),
            Screen::ChapterSelect => self.on_chapter_select(action),
            Screen::Loading => match action {
                Action::Quit => Effect::Quit,
                _ => Effect::None,
            },
            Screen::Quiz => self.on_quiz(action),
            Screen::Results => self.on_results(action),
            Screen::History => self.on_history(action, store),
        }
    }

    fn set_subject(&mut self, subject: Subject) {
        if self.subject != subject {
            self.subject = subject;
            self.chapters = ChapterPicker::default();
        }
    }

    fn cycle_subject(&mut self, step: isize) {
        let all = Subject::all();
        let pos = all.iter().position(|s| *s == self.subject).unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(all.len() as isize) as usize;
        self.set_subject(all[next]);
    }

    fn request(&self, test_type: TestType) -> SupplyRequest {
        SupplyRequest::new(test_type, self.subject).with_count(self.question_count)
    }

    fn on_dashboard(&mut self, action: Action) -> Effect {
        let items = MenuItem::ALL.len();
        match action {
            Action::Quit | Action::Back => return Effect::Quit,
            Action::Up => self.menu_cursor = self.menu_cursor.saturating_sub(1),
            Action::Down => self.menu_cursor = (self.menu_cursor + 1).min(items - 1),
            Action::Top => self.menu_cursor = 0,
            Action::Bottom => self.menu_cursor = items - 1,
            Action::Left => self.cycle_subject(-1),
            Action::Right | Action::NextSubject => self.cycle_subject(1),
            Action::Digit(d) if d >= 1 => {
                if let Some(s) = Subject::all().get(usize::from(d) - 1) {
                    self.set_subject(*s);
                }
            }
            Action::Select => return self.activate(MenuItem::ALL[self.menu_cursor]),
            _ => {}
        }
        Effect::None
    }

    fn activate(&mut self, item: MenuItem) -> Effect {
        match item {
            MenuItem::FullTest | MenuItem::MixedPractice => {
                Effect::Generate(self.request(TestType::Mixed))
            }
            MenuItem::StatementTest => Effect::Generate(self.request(TestType::StatementBased)),
            MenuItem::PyqMarathon => Effect::Generate(self.request(TestType::Pyq)),
            MenuItem::ChapterSelection => {
                self.screen = Screen::ChapterSelect;
                Effect::None
            }
            MenuItem::History => {
                self.history_cursor = 0;
                self.screen = Screen::History;
                Effect::None
            }
        }
    }

    fn on_chapter_select(&mut self, action: Action) -> Effect {
        let chapters = self.visible_chapters();
        let last = chapters.len().saturating_sub(1);
        match action {
            Action::Quit => return Effect::Quit,
            Action::Back => self.screen = Screen::Dashboard,
            Action::Up => self.chapters.cursor = self.chapters.cursor.saturating_sub(1),
            Action::Down => self.chapters.cursor = (self.chapters.cursor + 1).min(last),
            Action::Top => self.chapters.cursor = 0,
            Action::Bottom => self.chapters.cursor = last,
            Action::Select => {
                if let Some(ch) = chapters.get(self.chapters.cursor) {
                    self.chapters.selection.toggle(ch.name);
                }
            }
            Action::Submit => {
                if self.chapters.selection.is_empty() {
                    self.status.set_error("Select at least one chapter");
                } else {
                    let request = self
                        .request(TestType::ChapterWise)
                        .with_chapters(self.chapters.selection.names().to_vec());
                    return Effect::Generate(request);
                }
            }
            _ => {}
        }
        Effect::None
    }

    /// Switch to the loading screen for `request`
    pub fn begin_loading(&mut self, request: SupplyRequest) {
        let return_to = self.screen;
        self.loading =
            Some(LoadingState { request, started: Instant::now(), generated_chars: 0, return_to });
        self.screen = Screen::Loading;
    }

    /// Generation finished; start the attempt
    pub fn begin_quiz(&mut self, session: QuizSession) {
        self.loading = None;
        self.quiz = Some(QuizScreen::new(session, self.seconds_per_question));
        self.screen = Screen::Quiz;
    }

    /// Generation failed; go back where we came from with one error message
    pub fn generation_failed(&mut self, message: impl Into<String>) {
        let return_to = self.loading.take().map(|l| l.return_to).unwrap_or_default();
        self.screen = return_to;
        self.status.set_error(message);
    }

    fn leave_quiz(&mut self) {
        // dropping the screen cancels its countdown
        self.quiz = None;
        self.screen = Screen::Dashboard;
    }

    fn finish_quiz(&mut self) -> Effect {
        let Some(mut quiz) = self.quiz.take() else {
            return Effect::None;
        };
        quiz.countdown.stop();
        if let Err(e) = quiz.session.finalize() {
            tracing::error!("Failed to finalize: {}", e);
            self.screen = Screen::Dashboard;
            return Effect::None;
        }
        Effect::Finished(quiz.session)
    }

    fn on_quiz(&mut self, action: Action) -> Effect {
        let Some(quiz) = self.quiz.as_mut() else {
            self.screen = Screen::Dashboard;
            return Effect::None;
        };

        let armed = quiz.confirm.take();
        if armed.is_some() {
            self.status.clear();
        }

        if !quiz.jump_input.is_empty() {
            match action {
                Action::Digit(d) => {
                    quiz.push_jump_digit(d);
                    return Effect::None;
                }
                Action::Select => {
                    if let Err(e) = quiz.apply_jump() {
                        tracing::error!("Jump failed: {}", e);
                    }
                    return Effect::None;
                }
                Action::Back => {
                    quiz.jump_input.clear();
                    return Effect::None;
                }
                _ => quiz.jump_input.clear(),
            }
        }

        let session = &mut quiz.session;
        let result = match action {
            Action::Back | Action::Quit => {
                if armed == Some(Confirm::Exit) {
                    self.leave_quiz();
                } else {
                    quiz.confirm = Some(Confirm::Exit);
                    self.status.set_error("Press Esc again to leave without saving");
                }
                return Effect::None;
            }
            Action::Submit => {
                if armed == Some(Confirm::Submit) {
                    return self.finish_quiz();
                }
                let unanswered = session.len() - session.answered_count();
                quiz.confirm = Some(Confirm::Submit);
                self.status
                    .set_error(format!("Press s again to submit ({} unanswered)", unanswered));
                return Effect::None;
            }
            Action::Digit(d) => {
                quiz.push_jump_digit(d);
                Ok(())
            }
            Action::Option(i) if i < OPTION_COUNT => {
                quiz.option_cursor = i;
                session.record_answer(i)
            }
            Action::Up => {
                quiz.option_cursor = quiz.option_cursor.saturating_sub(1);
                Ok(())
            }
            Action::Down => {
                quiz.option_cursor = (quiz.option_cursor + 1).min(OPTION_COUNT - 1);
                Ok(())
            }
            Action::Select => session.record_answer(quiz.option_cursor),
            Action::ClearAnswer => session.clear_answer(),
            Action::Right | Action::Next => match session.next() {
                Ok(Advance::AtEnd) => return self.finish_quiz(),
                Ok(Advance::Moved(_)) => Ok(()),
                Err(e) => Err(e),
            },
            Action::Left | Action::Previous => session.previous().map(|_| ()),
            Action::Top => session.go_to(0),
            Action::Bottom => session.go_to(session.len() - 1),
            _ => Ok(()),
        };

        if matches!(
            action,
            Action::Right | Action::Next | Action::Left | Action::Previous | Action::Top | Action::Bottom
        ) {
            quiz.sync_cursor();
        }
        if let Err(e) = result {
            tracing::error!("Quiz action {:?} failed: {}", action, e);
        }
        Effect::None
    }

    /// Show a stored result
    pub fn show_review(&mut self, result: TestResult, return_to: Screen) {
        self.review = Some(ReviewState::new(result, return_to));
        self.screen = Screen::Results;
    }

    fn on_results(&mut self, action: Action) -> Effect {
        let Some(review) = self.review.as_mut() else {
            self.screen = Screen::Dashboard;
            return Effect::None;
        };
        let last = review.result.snapshot.len().saturating_sub(1);
        match action {
            Action::Quit => return Effect::Quit,
            Action::Back | Action::Select => {
                self.screen = review.return_to;
                self.review = None;
            }
            Action::Up => review.scroll = review.scroll.saturating_sub(1),
            Action::Down => review.scroll = (review.scroll + 1).min(last),
            Action::Top => review.scroll = 0,
            Action::Bottom => review.scroll = last,
            _ => {}
        }
        Effect::None
    }

    fn on_history(&mut self, action: Action, store: &ResultStore) -> Effect {
        let last = store.len().saturating_sub(1);
        match action {
            Action::Quit => return Effect::Quit,
            Action::Back => self.screen = Screen::Dashboard,
            Action::Up => self.history_cursor = self.history_cursor.saturating_sub(1),
            Action::Down => self.history_cursor = (self.history_cursor + 1).min(last),
            Action::Top => self.history_cursor = 0,
            Action::Bottom => self.history_cursor = last,
            Action::Select => {
                if let Some(result) = store.recent().nth(self.history_cursor) {
                    self.show_review(result.clone(), Screen::History);
                }
            }
            _ => {}
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::fixtures;

    fn empty_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path().join("history.json"));
        (dir, store)
    }

    fn quiz_state(count: usize) -> AppState {
        let mut state = AppState::new(count, 60);
        let session =
            QuizSession::new(fixtures::questions(count), Subject::Biology, TestType::Mixed).unwrap();
        state.begin_quiz(session);
        state
    }

    #[test]
    fn dashboard_starts_full_mixed_test() {
        let (_dir, store) = empty_store();
        let mut state = AppState::new(90, 60);
        match state.handle_action(Action::Select, &store) {
            Effect::Generate(req) => {
                assert_eq!(req.test_type, TestType::Mixed);
                assert_eq!(req.count, 90);
                assert!(req.chapters.is_empty());
            }
            other => panic!("expected Generate, got {:?}", other),
        }
    }

    #[test]
    fn subject_switch_clears_chapter_selection() {
        let (_dir, store) = empty_store();
        let mut state = AppState::new(90, 60);
        state.chapters.selection.toggle("The Living World");
        state.handle_action(Action::Digit(2), &store);
        assert_eq!(state.subject, Subject::Physics);
        assert!(state.chapters.selection.is_empty());

        state.handle_action(Action::Left, &store);
        assert_eq!(state.subject, Subject::Biology);
        state.handle_action(Action::Left, &store);
        assert_eq!(state.subject, Subject::Chemistry);
    }

    #[test]
    fn chapter_wise_requires_a_selection() {
        let (_dir, store) = empty_store();
        let mut state = AppState::new(90, 60);
        state.screen = Screen::ChapterSelect;

        assert!(matches!(state.handle_action(Action::Submit, &store), Effect::None));
        assert!(state.status.is_error);

        state.handle_action(Action::Down, &store);
        state.handle_action(Action::Select, &store);
        match state.handle_action(Action::Submit, &store) {
            Effect::Generate(req) => {
                assert_eq!(req.test_type, TestType::ChapterWise);
                assert_eq!(req.chapters, vec!["Biological Classification".to_string()]);
            }
            other => panic!("expected Generate, got {:?}", other),
        }
    }

    #[test]
    fn failed_generation_returns_to_previous_screen() {
        let mut state = AppState::new(90, 60);
        state.screen = Screen::ChapterSelect;
        state.begin_loading(SupplyRequest::new(TestType::ChapterWise, Subject::Biology));
        assert_eq!(state.screen, Screen::Loading);

        state.generation_failed("AI generation failed");
        assert_eq!(state.screen, Screen::ChapterSelect);
        assert!(state.quiz.is_none());
        assert!(state.loading.is_none());
        assert_eq!(state.status.message.as_deref(), Some("AI generation failed"));
    }

    #[tokio::test]
    async fn answering_and_navigating() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(3);

        state.handle_action(Action::Option(2), &store);
        state.handle_action(Action::Next, &store);
        state.handle_action(Action::Down, &store);
        state.handle_action(Action::Select, &store);
        state.handle_action(Action::Previous, &store);

        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.session.current_index(), 0);
        assert_eq!(quiz.session.answers(), &[Some(2), Some(1), None]);
        assert_eq!(quiz.option_cursor, 2);
    }

    #[tokio::test]
    async fn next_on_last_question_finalizes_and_stops_countdown() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(2);
        let token = state.quiz.as_ref().unwrap().countdown.cancel_token();

        state.handle_action(Action::Option(0), &store);
        assert!(matches!(state.handle_action(Action::Next, &store), Effect::None));
        assert!(!token.is_cancelled());
        match state.handle_action(Action::Next, &store) {
            Effect::Finished(session) => {
                assert!(session.is_complete());
                assert_eq!(session.answers(), &[Some(0), None]);
            }
            other => panic!("expected Finished, got {:?}", other),
        }
        assert!(state.quiz.is_none());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn submit_needs_confirmation() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(3);
        state.handle_action(Action::Option(1), &store);

        assert!(matches!(state.handle_action(Action::Submit, &store), Effect::None));
        assert_eq!(state.quiz.as_ref().unwrap().confirm, Some(Confirm::Submit));
        assert_eq!(state.status.message.as_deref(), Some("Press s again to submit (2 unanswered)"));

        // Any other key disarms it
        state.handle_action(Action::Next, &store);
        assert_eq!(state.quiz.as_ref().unwrap().confirm, None);
        assert!(matches!(state.handle_action(Action::Submit, &store), Effect::None));

        let token = state.quiz.as_ref().unwrap().countdown.cancel_token();
        match state.handle_action(Action::Submit, &store) {
            Effect::Finished(session) => assert_eq!(session.answers(), &[Some(1), None, None]),
            other => panic!("expected Finished, got {:?}", other),
        }
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn leaving_quiz_needs_confirmation_and_stops_countdown() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(2);
        let token = state.quiz.as_ref().unwrap().countdown.cancel_token();

        state.handle_action(Action::Back, &store);
        assert_eq!(state.screen, Screen::Quiz);
        assert_eq!(state.quiz.as_ref().unwrap().confirm, Some(Confirm::Exit));
        assert!(!token.is_cancelled());

        state.handle_action(Action::Back, &store);
        assert_eq!(state.screen, Screen::Dashboard);
        assert!(state.quiz.is_none());
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn other_key_cancels_exit_confirmation() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(2);

        state.handle_action(Action::Back, &store);
        state.handle_action(Action::Option(1), &store);
        state.handle_action(Action::Back, &store);
        assert_eq!(state.screen, Screen::Quiz);
    }

    #[tokio::test]
    async fn typed_number_jumps_and_resyncs_cursor() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(12);

        state.handle_action(Action::Digit(1), &store);
        state.handle_action(Action::Digit(1), &store);
        state.handle_action(Action::Option(3), &store);
        // Letter key dropped the pending number and answered question 1
        assert_eq!(state.quiz.as_ref().unwrap().session.current_index(), 0);
        assert!(state.quiz.as_ref().unwrap().jump_input.is_empty());

        state.handle_action(Action::Digit(1), &store);
        state.handle_action(Action::Digit(1), &store);
        assert_eq!(state.quiz.as_ref().unwrap().jump_input, "11");
        state.handle_action(Action::Select, &store);
        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.session.current_index(), 10);
        assert_eq!(quiz.option_cursor, 0);
        assert_eq!(quiz.session.current_answer(), None);

        state.handle_action(Action::Digit(1), &store);
        state.handle_action(Action::Select, &store);
        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.session.current_index(), 0);
        assert_eq!(quiz.option_cursor, 3);
    }

    #[tokio::test]
    async fn jump_ignores_numbers_past_the_end() {
        let (_dir, store) = empty_store();
        let mut state = quiz_state(5);

        state.handle_action(Action::Digit(0), &store);
        state.handle_action(Action::Digit(9), &store);
        assert!(state.quiz.as_ref().unwrap().jump_input.is_empty());

        state.handle_action(Action::Digit(4), &store);
        state.handle_action(Action::Digit(2), &store);
        assert_eq!(state.quiz.as_ref().unwrap().jump_input, "4");

        // Esc drops the number without arming exit
        state.handle_action(Action::Back, &store);
        let quiz = state.quiz.as_ref().unwrap();
        assert!(quiz.jump_input.is_empty());
        assert_eq!(quiz.confirm, None);
        assert_eq!(quiz.session.current_index(), 0);
    }

    #[test]
    fn history_review_returns_to_history() {
        let (_dir, mut store) = empty_store();
        let mut session =
            QuizSession::new(fixtures::questions(2), Subject::Physics, TestType::Pyq).unwrap();
        session.record_answer(0).unwrap();
        session.finalize().unwrap();
        store.append(TestResult::from_session(session).unwrap()).unwrap();

        let mut state = AppState::new(90, 60);
        state.screen = Screen::History;
        state.handle_action(Action::Select, &store);
        assert_eq!(state.screen, Screen::Results);
        assert_eq!(state.review.as_ref().unwrap().card.score, 4);

        state.handle_action(Action::Back, &store);
        assert_eq!(state.screen, Screen::History);
        assert!(state.review.is_none());
    }
}
