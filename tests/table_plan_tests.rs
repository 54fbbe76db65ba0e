#[cfg(test)]
mod tests {
    use anyhow::Result;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use gridline::data::provider::VecDataSource;
    use gridline::data::{CellValue, RowIdentity};
    use gridline::engine::actions::ActionsConfig;
    use gridline::engine::columns::ColumnSpec;
    use gridline::engine::row_state::RowStateMap;
    use gridline::engine::table::{
        ExpansionConfig, PhaseTracker, TableBody, TableComposer, TablePhase,
    };
    use gridline::ui::clipboard::{ClipboardBackend, CopyEvent, CopyFeedback};

    #[derive(Debug, Clone)]
    struct Subscription {
        id: u64,
        customer: String,
        plan: String,
        seats: i64,
        active: bool,
    }

    impl RowIdentity for Subscription {
        fn row_id(&self) -> String {
            format!("sub-{}", self.id)
        }
    }

    fn subscriptions() -> Vec<Subscription> {
        vec![
            Subscription {
                id: 1,
                customer: "Initech".to_string(),
                plan: "enterprise".to_string(),
                seats: 250,
                active: true,
            },
            Subscription {
                id: 2,
                customer: "Hooli".to_string(),
                plan: "starter".to_string(),
                seats: 0,
                active: false,
            },
        ]
    }

    fn composer() -> TableComposer<Subscription> {
        TableComposer::new(vec![
            ColumnSpec::new("customer", "Customer", 2.0)
                .accessor(|s: &Subscription| CellValue::Text(s.customer.clone()))
                .tooltip(),
            ColumnSpec::new("plan", "Plan", 1.0)
                .accessor(|s: &Subscription| CellValue::Text(s.plan.clone()))
                .clipboard(),
            ColumnSpec::new("seats", "Seats", 1.0)
                .accessor(|s: &Subscription| CellValue::Integer(s.seats)),
            ColumnSpec::new("actions", "", 1.0),
        ])
        .actions(
            ActionsConfig::new()
                .view("View", |_| {})
                .toggle("Active", |s: &Subscription| s.active, |_| {}),
        )
        .expansion(ExpansionConfig::new(
            |_| true,
            |s: &Subscription| format!("{} seats on the {} plan", s.seats, s.plan),
        ))
    }

    #[test]
    fn test_full_render_cycle_through_phases() {
        let composer = composer();
        let mut tracker = PhaseTracker::new();
        let mut source: VecDataSource<Subscription> = VecDataSource::loading();

        let plan = composer.compose(&source, &RowStateMap::new());
        tracker.observe(plan.phase);
        assert_eq!(plan.phase, TablePhase::Loading);
        assert_eq!(plan.columns.len(), 4);

        source.set_rows(subscriptions(), 2);
        let plan = composer.compose(&source, &RowStateMap::new());
        assert!(tracker.observe(plan.phase));
        assert_eq!(plan.phase, TablePhase::Populated);

        // A new fetch request moves the table back to loading.
        source.set_loading(true);
        let plan = composer.compose(&source, &RowStateMap::new());
        assert!(tracker.observe(plan.phase));
        assert_eq!(plan.phase, TablePhase::Loading);
    }

    #[test]
    fn test_populated_rows_carry_cells_actions_and_expansion() {
        let source = VecDataSource::new(subscriptions(), 2);
        let mut states = RowStateMap::new();
        states.toggle_expanded("sub-1");

        let plan = composer().compose(&source, &states);
        let TableBody::Populated { rows } = &plan.body else {
            panic!("expected populated body");
        };

        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.cells[0].display_text(), "Initech");
        assert_eq!(first.cells[0].tooltip_text(), Some("Initech"));
        assert_eq!(first.cells[1].clipboard_value(), Some("enterprise"));
        assert!(first.cells[3].is_actions());
        assert_eq!(first.actions.as_ref().unwrap().total(), 2);
        assert_eq!(
            first.sub_content.as_deref(),
            Some("250 seats on the enterprise plan")
        );

        let second = &rows[1];
        assert_eq!(second.cells[2].display_text(), "0");
        assert_eq!(second.sub_content, None);
        // Toggle icon follows the row's boolean state.
        assert_eq!(second.actions.as_ref().unwrap().inline[1].icon, "○");
    }

    /// Clipboard whose writes become visible only after an explicit sync,
    /// standing in for the platform's eventual consistency.
    #[derive(Default, Clone)]
    struct LaggyClipboard {
        inner: Rc<RefCell<ClipboardSlots>>,
    }

    #[derive(Default)]
    struct ClipboardSlots {
        written: Option<String>,
        visible: Option<String>,
    }

    impl LaggyClipboard {
        fn sync(&self) {
            let mut slots = self.inner.borrow_mut();
            slots.visible = slots.written.clone();
        }
    }

    impl ClipboardBackend for LaggyClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.inner.borrow_mut().written = Some(text.to_string());
            Ok(())
        }

        fn get_text(&mut self) -> Result<String> {
            self.inner
                .borrow()
                .visible
                .clone()
                .ok_or_else(|| anyhow::anyhow!("nothing on the clipboard"))
        }
    }

    #[test]
    fn test_copy_confirmation_drives_row_state_into_the_plan() {
        let source = VecDataSource::new(subscriptions(), 2);
        let composer = composer();
        let mut states = RowStateMap::new();
        let clipboard = LaggyClipboard::default();
        let mut copy = CopyFeedback::new(clipboard.clone());
        let t0 = Instant::now();

        // User copies the plan cell of the first row.
        copy.request_copy("sub-1", &CellValue::Text("enterprise".to_string()));

        // Nothing confirmed yet; the plan shows no copied row.
        for event in copy.poll(t0) {
            apply(&mut states, event);
        }
        let plan = composer.compose(&source, &states);
        let TableBody::Populated { rows } = &plan.body else {
            panic!("expected populated body");
        };
        assert!(!rows[0].copied);

        // The write lands; read-back confirms and the plan reflects it.
        clipboard.sync();
        for event in copy.poll(t0 + Duration::from_millis(50)) {
            apply(&mut states, event);
        }
        let plan = composer.compose(&source, &states);
        let TableBody::Populated { rows } = &plan.body else {
            panic!("expected populated body");
        };
        assert!(rows[0].copied);
        assert!(!rows[1].copied);

        // Two seconds later the copied state has cleared itself.
        for event in copy.poll(t0 + Duration::from_millis(2100)) {
            apply(&mut states, event);
        }
        let plan = composer.compose(&source, &states);
        let TableBody::Populated { rows } = &plan.body else {
            panic!("expected populated body");
        };
        assert!(!rows[0].copied);
    }

    fn apply(states: &mut RowStateMap, event: CopyEvent) {
        match event {
            CopyEvent::Confirmed(notice) => states.set_copied(&notice.row_id, true),
            CopyEvent::Expired { row_id } => states.set_copied(&row_id, false),
        }
    }
}
