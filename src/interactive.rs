//! Line-oriented front end for the two forms.
//!
//! Reads one command per line and writes prompts and results to `out`. Input
//! errors are printed and the loop keeps going; only I/O errors end it.

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::options::OptionKey;
use crate::session::{ActiveForm, App, Tab};

const HELP: &str = "\
commands:
  list                 show the current form
  toggle <opt>...      flip options (key, label or number); `toggle` may be omitted
  clear                turn every option off
  amount <N>           set the sales amount
  note <text>          set the sales note
  submit               produce the report
  copy                 copy the last report to the clipboard
  show                 print the last report
  tab feedback|sales   switch view (the other form is reset)
  help                 this text
  quit                 leave";

/// Drive `app` from `input` until EOF or `quit`.
pub fn run_session<R, W>(app: &mut App, clipboard: &mut Clipboard, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "[{}] type `help` for commands", app.active_tab().title())?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match cmd {
            "quit" | "exit" | "q" => break,
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "list" | "ls" => print_form(app, out)?,
            "tab" => match rest.parse::<Tab>() {
                Ok(tab) => {
                    app.switch_to(tab);
                    writeln!(out, "[{}]", app.active_tab().title())?;
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "submit" => submit(app, out)?,
            "show" => match last_report(app) {
                Some(report) => writeln!(out, "{}", report)?,
                None => writeln!(out, "아직 제출된 데이터가 없습니다.")?,
            },
            "copy" => copy(app, clipboard, out)?,
            "clear" => match app.form_mut() {
                ActiveForm::Feedback(f) => f.clear(),
                ActiveForm::Sales(_) => writeln!(out, "error: `clear` applies to the feedback form")?,
            },
            "amount" => match app.form_mut() {
                ActiveForm::Sales(s) => {
                    if let Err(e) = s.set_amount(rest) {
                        writeln!(out, "error: {}", e)?;
                    }
                }
                ActiveForm::Feedback(_) => writeln!(out, "error: `amount` applies to the sales form")?,
            },
            "note" => match app.form_mut() {
                ActiveForm::Sales(s) => s.set_note(rest),
                ActiveForm::Feedback(_) => writeln!(out, "error: `note` applies to the sales form")?,
            },
            "toggle" | "t" => toggle(app, rest, out)?,
            _ => toggle(app, line, out)?,
        }
    }
    Ok(())
}

fn toggle<W: Write>(app: &mut App, args: &str, out: &mut W) -> Result<()> {
    let ActiveForm::Feedback(form) = app.form_mut() else {
        writeln!(out, "error: options belong to the feedback form (`tab feedback`)")?;
        return Ok(());
    };
    if args.is_empty() {
        writeln!(out, "error: nothing to toggle")?;
        return Ok(());
    }
    // Parse everything first so a typo doesn't leave a half-applied line.
    let keys: std::result::Result<Vec<OptionKey>, _> = args
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<OptionKey>)
        .collect();
    match keys {
        Ok(keys) => {
            for k in keys {
                form.toggle(k);
                let mark = if form.state().is_selected(k) { "on" } else { "off" };
                writeln!(out, "{} {}", k.label(), mark)?;
            }
        }
        Err(e) => writeln!(out, "error: {}", e)?,
    }
    Ok(())
}

fn submit<W: Write>(app: &mut App, out: &mut W) -> Result<()> {
    match app.form_mut() {
        ActiveForm::Feedback(f) => writeln!(out, "{}", f.submit())?,
        ActiveForm::Sales(s) => match s.submit() {
            Ok(report) => writeln!(out, "{}", report)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        },
    }
    Ok(())
}

fn copy<W: Write>(app: &mut App, clipboard: &mut Clipboard, out: &mut W) -> Result<()> {
    let now = Instant::now();
    let result = match app.form_mut() {
        ActiveForm::Feedback(f) => f.copy_last(clipboard, now),
        ActiveForm::Sales(s) => s.copy_last(clipboard, now),
    };
    match result {
        Ok(true) => writeln!(out, "복사됨")?,
        Ok(false) => writeln!(out, "아직 제출된 데이터가 없습니다.")?,
        // Already logged by the clipboard helper; the user can retry.
        Err(e) => writeln!(out, "warning: failed to copy to clipboard: {}", e)?,
    }
    Ok(())
}

fn last_report(app: &App) -> Option<&str> {
    match app.form() {
        ActiveForm::Feedback(f) => f.last_report(),
        ActiveForm::Sales(s) => s.last_report(),
    }
}

fn print_form<W: Write>(app: &App, out: &mut W) -> Result<()> {
    writeln!(out, "[{}]", app.active_tab().title())?;
    match app.form() {
        ActiveForm::Feedback(f) => {
            for (i, (k, on)) in f.state().iter().enumerate() {
                let mark = if on { 'x' } else { ' ' };
                writeln!(out, "  [{}] {:>2} {} ({})", mark, i + 1, k.label(), k.key())?;
            }
        }
        ActiveForm::Sales(s) => {
            let entry = s.entry();
            match entry.amount {
                Some(a) => writeln!(out, "  amount: {}", a)?,
                None => writeln!(out, "  amount: -")?,
            }
            writeln!(out, "  note:   {}", entry.note.as_deref().unwrap_or("-"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::report::DEFAULT_STORE;
    use crate::session::SubmitHandler;

    fn drive(script: &str, backend: MemoryClipboard) -> (App, String) {
        let mut app = App::new(DEFAULT_STORE, || SubmitHandler::Log);
        let mut cb = Clipboard::new(
            Box::new(backend),
            Box::new(MemoryClipboard::unavailable("fallback")),
        );
        let mut out = Vec::new();
        run_session(&mut app, &mut cb, script.as_bytes(), &mut out).unwrap();
        (app, String::from_utf8(out).unwrap())
    }

    #[test]
    fn toggle_submit_copy() {
        let backend = MemoryClipboard::working("mem");
        let (app, out) = drive("toggle 밤 walnut\n1\n1\nsubmit\ncopy\n", backend.clone());
        assert!(out.contains("소비기한 임박 양갱으로 시식 서비스 진행 중입니다(밤/호두)"));
        assert!(out.contains("복사됨"));
        let copied = backend.text().unwrap();
        assert!(copied.ends_with("(밤/호두)"));
        assert!(copied.contains(" 서초점 "));
        match app.form() {
            ActiveForm::Feedback(f) => assert_eq!(f.last_report(), Some(copied.as_str())),
            ActiveForm::Sales(_) => panic!("expected feedback form"),
        }
    }

    #[test]
    fn bad_option_applies_nothing() {
        let (app, out) = drive("toggle redBean nope\n", MemoryClipboard::working("mem"));
        assert!(out.contains("error: unknown option"));
        match app.form() {
            ActiveForm::Feedback(f) => assert_eq!(f.state().selected_count(), 0),
            ActiveForm::Sales(_) => panic!("expected feedback form"),
        }
    }

    #[test]
    fn copy_before_submit_and_failed_copy() {
        let (_, out) = drive("copy\n", MemoryClipboard::working("mem"));
        assert!(out.contains("아직 제출된 데이터가 없습니다."));

        let (_, out) = drive("submit\ncopy\n", MemoryClipboard::failing("mem"));
        assert!(out.contains("warning: failed to copy to clipboard"));
        assert!(!out.contains("복사됨"));
    }

    #[test]
    fn sales_tab_flow() {
        let (app, out) = drive(
            "tab sales\nsubmit\namount 1,000원\nnote 맑음\nsubmit\nquit\nsubmit\n",
            MemoryClipboard::working("mem"),
        );
        assert_eq!(app.active_tab(), Tab::Sales);
        assert!(out.contains("error: sales amount is required"));
        assert_eq!(out.matches(" 매출 1,000원 (맑음)").count(), 1);
    }

    #[test]
    fn tab_switch_resets_feedback() {
        let (app, _) = drive("toggle 1 2 3\ntab sales\ntab feedback\n", MemoryClipboard::working("mem"));
        match app.form() {
            ActiveForm::Feedback(f) => assert_eq!(f.state().selected_count(), 0),
            ActiveForm::Sales(_) => panic!("expected feedback form"),
        }
    }
}
