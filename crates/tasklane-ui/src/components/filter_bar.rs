use tasklane_core::render::FilterButton;
use tasklane_core::{
  SortOrder,
  StatusFilter
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub buttons:      Vec<FilterButton>,
  pub sort:         SortOrder,
  pub sort_options:
    Vec<(SortOrder, &'static str)>,
  pub search:       String,
  pub placeholder:  &'static str,
  pub on_filter:    Callback<StatusFilter>,
  pub on_sort:      Callback<SortOrder>,
  pub on_search:    Callback<String>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_input = {
    let on_search =
      props.on_search.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      on_search.emit(input.value());
    })
  };

  let on_change = {
    let on_sort = props.on_sort.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let value = select.value();
      match SortOrder::parse(&value) {
        | Some(sort) => on_sort.emit(sort),
        | None => {
          tracing::warn!(value = %value, "unknown sort option")
        }
      }
    })
  };

  html! {
      <section class="filters">
          <div class="filter-buttons">
              {
                  for props.buttons.iter().map(|button| {
                      let on_filter = props.on_filter.clone();
                      let filter = button.filter;
                      html! {
                          <button
                              class={classes!("filter-btn", button.active.then_some("active"))}
                              data-filter={filter.as_key()}
                              onclick={move |_| on_filter.emit(filter)}
                          >
                              { button.label }
                          </button>
                      }
                  })
              }
          </div>
          <select id="sort-select" onchange={on_change}>
              {
                  for props.sort_options.iter().map(|(sort, label)| html! {
                      <option value={sort.as_key()} selected={*sort == props.sort}>
                          { *label }
                      </option>
                  })
              }
          </select>
          <input
              id="search-input"
              type="search"
              placeholder={props.placeholder}
              value={props.search.clone()}
              oninput={on_input}
          />
      </section>
  }
}
