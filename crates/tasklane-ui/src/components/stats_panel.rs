use tasklane_core::Labels;
use tasklane_core::render::StatsView;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats:  StatsView,
  pub labels: &'static Labels
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let labels = props.labels;
  let stats = &props.stats;

  html! {
      <section class="stats">
          <div class="stat-card">
              <span class="stat-value" id="active-tasks">{ &stats.active }</span>
              <span class="stat-label">{ labels.stats_active }</span>
          </div>
          <div class="stat-card">
              <span class="stat-value" id="completed-tasks">{ &stats.completed }</span>
              <span class="stat-label">{ labels.stats_completed }</span>
          </div>
          <div class="stat-card">
              <span class="stat-value" id="total-tasks">{ &stats.total }</span>
              <span class="stat-label">{ labels.stats_total }</span>
          </div>
          <div class="progress">
              <div
                  class="progress-bar"
                  style={format!("width: {}", stats.rate_width)}
              ></div>
          </div>
          <span class="progress-text" id="completion-rate">{ &stats.rate_text }</span>
      </section>
  }
}
