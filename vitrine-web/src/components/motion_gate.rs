use vitrine_perf::AnimationKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub kind: AnimationKind,
    #[prop_or_default]
    pub children: Html,
    /// Nominal duration before tier scaling.
    #[prop_or(300.0)]
    pub base_duration_ms: f64,
    #[prop_or_default]
    pub class: Classes,
}

const fn kind_label(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::Basic => "basic",
        AnimationKind::Complex => "complex",
        AnimationKind::Particles => "particles",
    }
}

/// Wraps content that animates, asking the governor at render time whether it
/// may. Outside a provider the content renders static.
#[function_component(MotionGate)]
pub fn motion_gate(p: &Props) -> Html {
    let perf = crate::provider::use_performance();
    let (animate, duration_ms) = perf.as_ref().map_or((false, 0.0), |perf| {
        (
            perf.should_animate(p.kind),
            perf.animation_duration(p.base_duration_ms),
        )
    });
    let state = if animate { "is-animated" } else { "is-static" };
    let style = format!("--motion-duration:{duration_ms:.0}ms");

    html! {
        <div class={classes!("motion-gate", state, p.class.clone())}
             data-kind={kind_label(p.kind)}
             style={style}>
            { p.children.clone() }
        </div>
    }
}
