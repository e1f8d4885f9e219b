

// imports
use crate::similarity::Cluster;

use std::error::Error;
use bhtsne::tSNE;
use ndarray::prelude::*;
use plotters::prelude::*;

const PERPLEXITY: f32 = 30.0;
const THETA: f32 = 0.5;
const TSNE_EPOCHS: usize = 2000;
const MARGIN: u32 = 15;
const FONT_STYLE: (&str, i32) = ("sans-serif", 15);
const IMG_SIZE: (u32, u32) = (900, 900);

// reduces the concatenation of all clusters to 2d in a single t-SNE call.
// reducing per cluster would make the projected inter-cluster distances
// meaningless, the joint run keeps them comparable.
pub fn reduce_clusters(clusters: &[Cluster]) -> Result<Array2<f32>, Box<dyn Error>> {

    let mut samples: Vec<Vec<f32>> = Vec::new();
    for cluster in clusters {
        for row in cluster.vectors.axis_iter(Axis(0)) {
            samples.push(row.to_vec());
        }
    }

    let n = samples.len();
    if n == 0 {
        return Err(format!("no cluster vectors to reduce").into());
    }

    // bhtsne needs at least 3 * perplexity + 1 points, clamp for small inputs
    let perplexity = PERPLEXITY.min(((n - 1) as f32 / 3.0).floor()).max(1.0);

    let points: Vec<f32> = tSNE::new(&samples)
        .embedding_dim(2)
        .perplexity(perplexity)
        .epochs(TSNE_EPOCHS)
        .barnes_hut(THETA, |a, b| {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f32>()
                .sqrt()
        })
        .embedding();

    let projection = Array2::from_shape_vec((n, 2), points)?;
    Ok(projection)
}

// scatter of all clusters in the jointly reduced plane, one color per seed
// word, the token written next to each point
pub fn draw_clusters(clusters: &[Cluster], save_to: &str) -> Result<(), Box<dyn Error>> {

    let projection = reduce_clusters(clusters)?;

    let padding = 2.0;
    let xs = projection.slice(s![.., 0usize]);
    let ys = projection.slice(s![.., 1usize]);
    let x_min = xs.iter().cloned().fold(f32::INFINITY, f32::min) - padding;
    let x_max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max) + padding;
    let y_min = ys.iter().cloned().fold(f32::INFINITY, f32::min) - padding;
    let y_max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max) + padding;

    let root_area = BitMapBackend::new(save_to, IMG_SIZE).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .margin(MARGIN)
        .x_label_area_size(10)
        .y_label_area_size(10)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .disable_y_axis()
        .draw()?;

    // a closure for token label and position, colored by cluster
    let position_and_word = |x: f32, y: f32, token: String, color: RGBAColor| {
        return EmptyElement::at((x, y))
            + Circle::new((0, 0), 3, ShapeStyle::from(color).filled())
            + Text::new(token, (10, 0), FONT_STYLE.into_font());
    };

    let mut point_i = 0;
    for (cluster_i, cluster) in clusters.iter().enumerate() {
        let color = Palette99::pick(cluster_i).to_rgba();
        for token in &cluster.tokens {
            let x = projection[[point_i, 0]];
            let y = projection[[point_i, 1]];
            chart.plotting_area().draw(&position_and_word(x, y, token.to_string(), color))?;
            point_i += 1;
        }
    }

    chart.plotting_area().present()?;
    Ok(())
}
