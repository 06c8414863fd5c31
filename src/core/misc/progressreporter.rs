use indicatif::*;

pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_work: usize, title: &str) -> Self {
        let pb = ProgressBar::new(total_work as u64);
        let template = format!("{{spinner:.bold.green}} {}: ", title)
            + "[{wide_bar:.cyan}]  ({elapsed_precise}|{eta_precise}) ";
        if let Ok(style) = ProgressStyle::with_template(&template) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁  "));
        }
        pb.tick();
        ProgressReporter { pb }
    }

    /// A reporter that draws nothing, for quiet runs and tests.
    pub fn hidden(total_work: usize) -> Self {
        let pb = ProgressBar::with_draw_target(Some(total_work as u64), ProgressDrawTarget::hidden());
        ProgressReporter { pb }
    }

    pub fn update(&mut self, num: usize) {
        if num != 0 {
            self.pb.inc(num as u64);
        }
    }

    pub fn done(&mut self) {
        self.pb.finish();
    }
}
