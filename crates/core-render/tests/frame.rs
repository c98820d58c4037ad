//! Full-frame scenarios against the in-memory terminal.

use core_render::{Renderer, status::USAGE};
use core_state::Pager;
use core_terminal::MemoryBackend;
use core_text::{Attrs, Color, Style};
use pretty_assertions::assert_eq;

fn draw(pager: &mut Pager, width: u16, height: u16) -> MemoryBackend {
    let mut term = MemoryBackend::new(width, height);
    Renderer::new().draw(&mut term, pager).unwrap();
    term
}

fn pager_with(text: &str) -> Pager {
    let mut p = Pager::new(Vec::new());
    p.set_content(text);
    p
}

#[test]
fn body_starts_below_status_line() {
    let mut p = pager_with("one\ntwo\nthree\nfour\n");
    let term = draw(&mut p, 60, 4);
    assert_eq!(
        term.screen(),
        vec![USAGE.trim_end().to_string(), "one".into(), "two".into(), "three".into()]
    );
    assert_eq!(term.cell(0, 0).unwrap().style, Style::STATUS);
    assert_eq!(term.cell(59, 0).unwrap().style, Style::STATUS);
}

#[test]
fn color_escape_applies_until_reset() {
    let mut p = pager_with("\x1b[31mx\x1b[my\n");
    let term = draw(&mut p, 20, 2);
    let x = term.cell(0, 1).unwrap();
    assert_eq!(x.ch, 'x');
    assert_eq!(x.style.fg, Color::Red);
    let y = term.cell(1, 1).unwrap();
    assert_eq!(y.ch, 'y');
    assert_eq!(y.style, Style::DEFAULT);
}

#[test]
fn horizontal_offset_skips_leading_columns_per_line() {
    let mut p = pager_with("abcdef\n\x1b[32mghijkl\x1b[0m\n");
    p.resize(4, 3);
    p.scroll_right();
    p.scroll_right();
    let term = draw(&mut p, 4, 3);
    assert_eq!(term.row_text(1), "cdef");
    assert_eq!(term.row_text(2), "ijkl");
    assert_eq!(term.cell(0, 2).unwrap().style.fg, Color::Green);
}

#[test]
fn vertical_offset_selects_lines() {
    let text: String = (0..10).map(|i| format!("line{i}\n")).collect();
    let mut p = pager_with(&text);
    p.resize(20, 4);
    p.page_down();
    let term = draw(&mut p, 20, 4);
    // Ten lines, three body rows: the last page starts at line 7.
    assert_eq!(&term.screen()[1..], &["line7", "line8", "line9"]);
}

#[test]
fn query_hits_are_reverse_video() {
    let mut p = pager_with("say Hello there\n");
    p.begin_query();
    "hello".chars().for_each(|c| p.push_query_char(c));
    let term = draw(&mut p, 80, 2);
    for x in 4..9 {
        assert_eq!(term.cell(x, 1).unwrap().style, Style::HIGHLIGHT, "column {x}");
    }
    assert_eq!(term.cell(3, 1).unwrap().style, Style::DEFAULT);
    assert_eq!(term.cell(9, 1).unwrap().style, Style::DEFAULT);
    assert!(term.row_text(0).ends_with(":: [search string: hello ]"));
}

#[test]
fn erase_down_restarts_from_remainder() {
    let mut p = pager_with("stale\n\x1b[Jfresh\n");
    let mut term = MemoryBackend::new(20, 3);
    let mut renderer = Renderer::new();
    renderer.draw(&mut term, &mut p).unwrap();
    assert_eq!(term.row_text(1), "fresh");
    assert_eq!(p.document().text(), "fresh\n");
    assert_eq!(renderer.restarts(), 1);
    assert_eq!(term.sync_count(), 1);
}

#[test]
fn hidden_cursor_full_clear_replaces_screen() {
    let mut p = pager_with("old frame\n\x1b[?25l\x1b[H\x1b[2Jnew frame\n");
    let mut term = MemoryBackend::new(20, 3);
    Renderer::new().draw(&mut term, &mut p).unwrap();
    assert_eq!(term.row_text(1), "new frame");
    assert_eq!(term.row_text(2), "");
    assert_eq!(p.document().text(), "new frame\n");
    assert_eq!(term.sync_count(), 1);
    assert!(term.flush_count() >= 2);
}

#[test]
fn search_navigate_status_reports_offset() {
    let mut p = Pager::new(vec!["a.log".into(), "b.log".into()]);
    p.set_content("x\ny\nneedle\nz\n");
    p.begin_query();
    "needle".chars().for_each(|c| p.push_query_char(c));
    p.commit_query();
    let term = draw(&mut p, 200, 3);
    assert_eq!(
        term.row_text(0),
        "USAGE [exit: ESC/q] [scroll: j,k/C-n,C-p] [next file: Ctrl-h,Ctrl-l] :: [file: a.log ] \
         :: [searching: needle (lines: 2)] :: [forward search: n] [backward search: N] \
         [exit search: ESC/Ctrl-C]"
    );
    assert_eq!(term.row_text(1), "needle");
}

#[test]
fn unknown_sequences_are_invisible() {
    let mut p = pager_with("a\x1b[5Cb\x1b[?1049hc\r\n");
    let term = draw(&mut p, 10, 2);
    assert_eq!(term.row_text(1), "abc");
}

#[test]
fn tabs_expand_and_controls_stay_off_screen() {
    let mut p = pager_with("a\tb\x08c\n");
    let term = draw(&mut p, 20, 2);
    assert_eq!(term.row_text(1), "a       bc");
    assert!((0..20).all(|x| !term.cell(x, 1).unwrap().ch.is_control()));
    assert_eq!(term.cell(8, 1).unwrap().ch, 'b');
}

#[test]
fn extended_colors_do_not_leak_attributes() {
    let mut p = pager_with("\x1b[31m\x1b[1;38;2;0;128;0my\x1b[48;5;4mz\n");
    let term = draw(&mut p, 20, 2);
    let y = term.cell(0, 1).unwrap().style;
    assert_eq!(y.fg, Color::Red);
    assert_eq!(y.attrs, Attrs::BOLD);
    let z = term.cell(1, 1).unwrap().style;
    assert_eq!(z.bg, Color::Blue);
    assert_eq!(z.attrs, Attrs::BOLD);
}
