use std::cmp::Reverse;
use std::collections::VecDeque;

use itertools::Itertools;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
};

use pangolin_api::types::{AnalyticsSummary, TrafficSample};

/// Samples kept on screen.
const HISTORY: usize = 20;

#[derive(Debug, Clone)]
struct ThroughputHistory {
    /// (inbound, outbound) in KB per poll period.
    samples: VecDeque<(u64, u64)>,
    inbound_max: u64,
    outbound_max: u64,
}

impl ThroughputHistory {
    fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY),
            inbound_max: 0,
            outbound_max: 0,
        }
    }

    fn push(&mut self, inbound: u64, outbound: u64) {
        if self.samples.len() == HISTORY {
            self.samples.pop_front();
        }
        self.samples.push_back((inbound, outbound));
        self.inbound_max = self.samples.iter().map(|(i, _)| *i).max().unwrap_or(0);
        self.outbound_max = self.samples.iter().map(|(_, o)| *o).max().unwrap_or(0);
    }
}

#[derive(Debug)]
pub struct Traffic {
    history: ThroughputHistory,
    last_sample: Option<TrafficSample>,
    analytics: Option<AnalyticsSummary>,
}

impl Default for Traffic {
    fn default() -> Self {
        Self::new()
    }
}

impl Traffic {
    pub fn new() -> Self {
        Self {
            history: ThroughputHistory::new(),
            last_sample: None,
            analytics: None,
        }
    }

    /// Backend counters are cumulative. The first sample only primes the
    /// baseline, every following one contributes its delta to the history.
    pub fn push_sample(&mut self, sample: TrafficSample) {
        if let Some(last) = &self.last_sample {
            let inbound = sample.inbound.saturating_sub(last.inbound) / 1024;
            let outbound = sample.outbound.saturating_sub(last.outbound) / 1024;
            self.history.push(inbound, outbound);
        }
        self.last_sample = Some(sample);
    }

    pub fn set_analytics(&mut self, analytics: AnalyticsSummary) {
        self.analytics = Some(analytics);
    }

    pub fn render(&self, frame: &mut Frame, block: Rect) {
        let area = block.inner(Margin {
            horizontal: 2,
            vertical: 2,
        });

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_throughput(frame, chunks[0]);
        self.render_analytics(frame, chunks[1]);
    }

    fn render_throughput(&self, frame: &mut Frame, area: Rect) {
        if self.history.samples.is_empty() {
            frame.render_widget(waiting("Waiting for traffic telemetry"), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let inbound: Vec<u64> = self.history.samples.iter().map(|(i, _)| *i).collect();
        let outbound: Vec<u64> = self.history.samples.iter().map(|(_, o)| *o).collect();

        render_throughput_chart(
            frame,
            chunks[0],
            " Inbound ",
            &inbound,
            self.history.inbound_max,
            Color::Green,
        );
        render_throughput_chart(
            frame,
            chunks[1],
            " Outbound ",
            &outbound,
            self.history.outbound_max,
            Color::Cyan,
        );
    }

    fn render_analytics(&self, frame: &mut Frame, area: Rect) {
        let Some(analytics) = &self.analytics else {
            frame.render_widget(waiting("Waiting for analytics"), area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(area);

        let traffic_bars = [
            Bar::default().label("Total".into()).value(analytics.traffic.total),
            Bar::default()
                .label("Blocked".into())
                .value(analytics.traffic.blocked)
                .style(Style::default().fg(Color::Red)),
            Bar::default()
                .label("Susp".into())
                .value(analytics.traffic.suspicious)
                .style(Style::default().fg(Color::Yellow)),
        ];
        frame.render_widget(
            BarChart::default()
                .block(titled_block(" Traffic "))
                .bar_width(8)
                .bar_gap(2)
                .data(BarGroup::default().bars(&traffic_bars)),
            chunks[0],
        );

        let attack_bars = [
            Bar::default().label("Total".into()).value(analytics.attacks.total),
            Bar::default()
                .label("DDoS".into())
                .value(analytics.attacks.ddos)
                .style(Style::default().fg(Color::Red)),
            Bar::default()
                .label("Brute".into())
                .value(analytics.attacks.bruteforce)
                .style(Style::default().fg(Color::Magenta)),
            Bar::default()
                .label("Other".into())
                .value(analytics.attacks.other)
                .style(Style::default().fg(Color::Yellow)),
        ];
        frame.render_widget(
            BarChart::default()
                .block(titled_block(" Attacks "))
                .bar_width(6)
                .bar_gap(1)
                .data(BarGroup::default().bars(&attack_bars)),
            chunks[1],
        );

        let attacker_bars: Vec<Bar> = analytics
            .top_attackers
            .iter()
            .sorted_by_key(|attacker| Reverse(attacker.attempts))
            .take(8)
            .map(|attacker| {
                Bar::default()
                    .label(attacker.ip.clone().into())
                    .value(attacker.attempts)
                    .style(Style::default().fg(Color::Red))
            })
            .collect();
        frame.render_widget(
            BarChart::default()
                .direction(Direction::Horizontal)
                .block(titled_block(" Top Attackers "))
                .bar_width(1)
                .bar_gap(1)
                .data(BarGroup::default().bars(&attacker_bars)),
            chunks[2],
        );
    }
}

fn render_throughput_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    values: &[u64],
    max_kb: u64,
    color: Color,
) {
    let (divisor, unit) = unit_for(max_kb);
    let top = (max_kb as f64 / divisor).max(1.);
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, kb)| (i as f64, *kb as f64 / divisor))
        .collect();

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(titled_block(title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0., (HISTORY - 1) as f64]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .labels([
                    Line::from("0"),
                    Line::from(format!("{:.0} {unit}", top / 2.)),
                    Line::from(format!("{top:.0} {unit}")),
                ])
                .bounds([0., top]),
        );

    frame.render_widget(chart, area);
}

fn unit_for(max_kb: u64) -> (f64, &'static str) {
    match max_kb {
        n if n >= 1024 * 1024 => ((1024u64 * 1024) as f64, "GB"),
        n if n >= 1024 => (1024., "MB"),
        _ => (1., "KB"),
    }
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title.to_owned())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn waiting(message: &str) -> Paragraph<'_> {
    Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
}
