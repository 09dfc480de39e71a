//! Interactive plots of simulation runs.
//!
//! A [`PlotObserver`] gathers `(x, y)` points for a fixed number of named
//! traces, either live as the driver's observer or afterwards from a
//! finished [`Trajectory`], and renders them in an egui window.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use stride_core::{Observer, Record, Trajectory};
use stride_solvers::transient::Event;

/// Window options for [`PlotObserver::show`].
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Orbit").legend().equal_aspect())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    equal_aspect: bool,
}

impl ShowConfig {
    /// Untitled, no legend, each axis scaled independently.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shows trace names in a legend.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Uses the same scale on both axes, for paths in the plane.
    #[must_use]
    pub fn equal_aspect(mut self) -> Self {
        self.equal_aspect = true;
        self
    }
}

/// Chooses where an observed event lands on the plot.
///
/// Driver events plot time against the first `N` state components, so
/// `&mut PlotObserver<N>` can be handed to `transient::run` as is. A `None`
/// x drops the event; a `None` trace value drops only that trace's point.
pub trait Plottable<const N: usize> {
    fn x(&self) -> Option<f64>;

    fn traces(&self) -> [Option<f64>; N];
}

impl<Q, const N: usize> Plottable<N> for Event<'_, Q> {
    fn x(&self) -> Option<f64> {
        Some(self.record.time)
    }

    fn traces(&self) -> [Option<f64>; N] {
        std::array::from_fn(|i| self.record.state.get(i))
    }
}

/// One named series of points.
#[derive(Debug, Clone)]
struct Trace {
    name: String,
    points: Vec<[f64; 2]>,
}

/// Collects `N` traces during or after a run and shows them in a window.
///
/// Used live as an observer it plots state against time. For phase planes,
/// energies and other derived columns, feed a finished trajectory through
/// [`record_trajectory`][PlotObserver::record_trajectory] instead:
///
/// ```ignore
/// let solution = transient::run_unobserved(&pendulum, &Rk4, &pendulum, initial, &config)?;
///
/// let mut obs = PlotObserver::<1>::new(["total energy"]);
/// obs.record_trajectory(&solution.trajectory, |r| (r.time, [Some(r.derived.total)]));
/// obs.show(ShowConfig::new().title("Pendulum"))?;
/// ```
pub struct PlotObserver<const N: usize> {
    traces: [Trace; N],
}

impl<const N: usize> PlotObserver<N> {
    pub fn new(names: [&str; N]) -> Self {
        Self {
            traces: names.map(|name| Trace {
                name: name.to_owned(),
                points: Vec::new(),
            }),
        }
    }

    /// Adds a point at `x` to every trace whose value is `Some`.
    pub fn record(&mut self, x: f64, values: [Option<f64>; N]) {
        for (trace, y) in self.traces.iter_mut().zip(values) {
            if let Some(y) = y {
                trace.points.push([x, y]);
            }
        }
    }

    /// Adds one point set per record of a finished run.
    pub fn record_trajectory<Q, F>(&mut self, trajectory: &Trajectory<Q>, mut select: F)
    where
        F: FnMut(&Record<Q>) -> (f64, [Option<f64>; N]),
    {
        for record in trajectory {
            let (x, values) = select(record);
            self.record(x, values);
        }
    }

    /// Shows the collected traces and returns once the window is closed.
    ///
    /// # Errors
    ///
    /// Fails if no native window can be opened.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let app = PlotApp {
            traces: self.traces.into(),
            config,
        };

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets the driver consume a borrow, leaving the observer to be shown.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

struct PlotApp {
    traces: Vec<Trace>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("stride_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if self.config.equal_aspect {
                plot = plot.data_aspect(1.0);
            }

            plot.show(ui, |plot_ui| {
                for trace in &self.traces {
                    let points: PlotPoints<'_> = trace.points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(&trace.name));
                }
            });
        });
    }
}
