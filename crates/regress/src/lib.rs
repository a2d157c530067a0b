mod line;

pub use line::LineFit;
