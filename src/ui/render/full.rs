use crate::ui::model::Model;

pub fn render_full(m: &Model) -> String {
    let mut lines = m.render_input_block();
    lines.extend(m.render_main_content().lines().map(str::to_string));
    lines.extend(m.render_counters());
    let first_line = crate::ui::render::modeline::render_modeline_padded(m)
        .lines()
        .next()
        .unwrap_or("")
        .to_string();
    lines.push(first_line);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::countdown::{Container, CountdownBoard, CounterElement};
    use crate::names::{Identifier, NameEntry, NameIndex};
    use crate::ui::Msg;
    use regex::Regex;

    // helper to strip ANSI CSI sequences from rendered output for assertions
    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn sample_index() -> NameIndex {
        let names: Vec<String> = (1..=50).map(|i| format!("idol{i}")).collect();
        names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), NameEntry::new(n, Identifier::Number(i as u64 + 1))))
            .collect()
    }

    fn sample_board() -> CountdownBoard {
        CountdownBoard::new(
            Some(Container::default()),
            vec![CounterElement::new("Live Parade", "90061")],
        )
    }

    #[test]
    fn render_full_matches_dimensions() {
        // sample sizes to validate behavior across different terminal shapes
        let sizes = [(80usize, 24usize), (100usize, 10usize), (40usize, 20usize)];

        for (w, h) in sizes.iter().cloned() {
            let mut m = crate::ui::initial_model(sample_board());
            m.update(Msg::NamesLoaded(Ok(sample_index())));
            m.update(Msg::WindowSize {
                width: w,
                height: h,
            });
            m.update(Msg::Rune('i'));
            m.update(Msg::Tick { now_ms: 0 });

            let stripped = strip_ansi(&m.render_full());
            let lines: Vec<&str> = stripped.lines().collect();
            assert_eq!(
                lines.len(),
                h,
                "height mismatch for {w}x{h}: got {} lines\n<<output>>\n{stripped}",
                lines.len()
            );
            for (idx, line) in lines.iter().enumerate() {
                let lw = line.chars().count();
                assert_eq!(
                    lw, w,
                    "width mismatch at line {idx} for {w}x{h}: got {lw} chars\nline: `{line}`\n<<output>>\n{stripped}"
                );
            }
        }
    }

    #[test]
    fn layout_is_input_list_counters_modeline() {
        let (w, h) = (60usize, 12usize);
        let mut m = crate::ui::initial_model(sample_board());
        m.update(Msg::NamesLoaded(Ok(sample_index())));
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        m.update(Msg::Rune('l'));
        m.update(Msg::Rune('5'));
        m.update(Msg::Tick { now_ms: 0 });
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();

        assert!(lines[1].contains("> l5"), "input line: `{}`", lines[1]);
        assert!(lines[3].contains("idol5"));
        assert!(lines[3].contains("/char/5"));
        assert!(lines[h - 2].contains("Live Parade  1 day, 01:01:01"));
        let modeline = strip_ansi(&crate::ui::render::render_modeline_padded(&m));
        assert_eq!(lines[h - 1], modeline.lines().next().unwrap_or(""));
    }

    #[test]
    fn loading_marker_shows_until_names_arrive() {
        let mut m = crate::ui::initial_model(CountdownBoard::default());
        m.update(Msg::WindowSize { width: 40, height: 10 });
        m.update(Msg::Rune('x'));
        let stripped = strip_ansi(&m.render_full());
        assert!(stripped.lines().nth(1).unwrap_or("").contains("> x …"));
        assert!(stripped.contains("loading names"));
    }
}
