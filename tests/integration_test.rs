use chrono::NaiveDate;
use yanggang_lib::options::OptionKey;
use yanggang_lib::report::{DEFAULT_STORE, format_report, title_line};
use yanggang_lib::selection::SelectionState;
use yanggang_lib::session::{FeedbackSession, SubmitHandler};

#[test]
fn integration_title_and_report() {
    // Build the title for a fixed moment and format a two-option report
    let at = NaiveDate::from_ymd_opt(2026, 7, 10)
        .and_then(|d| d.and_hms_opt(14, 5, 0))
        .expect("valid timestamp");
    let title = title_line(&at, DEFAULT_STORE);
    assert_eq!(title, "07/10 서초점 14:05");

    let state = SelectionState::from_selected(["walnut", "밤"].map(|s| s.parse::<OptionKey>().expect("option")));
    assert_eq!(
        format_report(&title, &state),
        "07/10 서초점 14:05 소비기한 임박 양갱으로 시식 서비스 진행 중입니다(밤/호두)"
    );

    let mut session = FeedbackSession::new(DEFAULT_STORE, SubmitHandler::Log);
    session.toggle(OptionKey::Chestnut);
    session.toggle(OptionKey::Walnut);
    assert_eq!(session.submit_at(&at), format_report(&title, &state));
}
