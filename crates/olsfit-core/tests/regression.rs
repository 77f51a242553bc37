use olsfit_core::data::load_csv_from_reader;
use olsfit_core::pipeline::{run_on_dataset, FitJob};
use olsfit_core::processevent::{EvalEvent, EvalSet, EventLog, ProcessEvent};
use olsfit_core::stats::{
    mean_absolute_error, mean_squared_error, r_squared, root_mean_squared_error, ErrorKind,
};
use olsfit_core::{Estimator, FitError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn perfect_line_end_to_end() {
    let x = [1., 2., 3., 4., 5.];
    let y = [3., 5., 7., 9., 11.];

    let mut est = Estimator::new();
    est.fit(&x, &y).unwrap();
    assert!((est.slope().unwrap() - 2.0).abs() < 1e-9);
    assert!((est.intercept().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(est.predict(&[6.]).unwrap(), vec![13.0]);

    let y_hat = est.predict(&x).unwrap();
    assert_eq!(r_squared(&y, &y_hat), Ok(1.0));
    assert_eq!(mean_squared_error(&y, &y_hat), Ok(0.0));
    assert_eq!(root_mean_squared_error(&y, &y_hat), Ok(0.0));
    assert_eq!(mean_absolute_error(&y, &y_hat), Ok(0.0));
}

#[test]
fn error_kinds_at_the_boundary() {
    let mut est = Estimator::new();
    assert_eq!(est.predict(&[1., 2., 3.]).unwrap_err().kind(), ErrorKind::NotFitted);
    assert_eq!(est.fit(&[5., 5., 5.], &[1., 2., 3.]).unwrap_err().kind(), ErrorKind::DegenerateInput);
    assert_eq!(est.fit(&[1., 2., 3.], &[1., 2.]).unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(mean_squared_error(&[1., 2.], &[1.]).unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(r_squared(&[], &[]).unwrap_err().kind(), ErrorKind::InvalidInput);
}

#[test]
fn evaluate_mse_agrees_with_metrics_on_noisy_data() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let n = rng.random_range(2..200);
        let x: Vec<f64> = (0..n).map(|i| i as f64 + rng.random_range(0.0_f64..0.5)).collect();
        let y: Vec<f64> = x.iter().map(|v| -0.7 * v + 3.0 + rng.random_range(-2.0_f64..2.0)).collect();

        let mut est = Estimator::new();
        est.fit(&x, &y).unwrap();
        let y_hat = est.predict(&x).unwrap();
        assert_eq!(est.evaluate_mse(&x, &y).unwrap(), mean_squared_error(&y, &y_hat).unwrap());
        assert_eq!(est.evaluate_r2(&x, &y).unwrap(), r_squared(&y, &y_hat).unwrap());
        assert!(r_squared(&y, &y_hat).unwrap() <= 1.0);
    }
}

#[test]
fn independent_estimators_across_threads() {
    let handles: Vec<_> = (1..=4)
        .map(|m| {
            std::thread::spawn(move || {
                let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
                let y: Vec<f64> = x.iter().map(|v| m as f64 * v).collect();
                let mut est = Estimator::new();
                est.fit(&x, &y).map(|_| est)
            })
        })
        .collect();

    for (m, h) in (1..=4).zip(handles) {
        let est = h.join().unwrap().unwrap();
        assert!((est.slope().unwrap() - m as f64).abs() < 1e-9);
    }
}

#[test]
fn csv_to_report() {
    let csv = "km,price\n240000,3650\n139800,3800\n150500,4400\n185530,4450\n176000,5250\n\
               114800,5350\n166800,5800\n89000,5990\n144500,6200\n84000,6390\n82029,6390\n\
               63060,6600\n74000,6800\n97500,6800\n67000,6900\n76025,6900\n48235,6990\n\
               93000,7490\n60949,7555\n65674,7990\n54000,7990\n68500,7990\n22899,7990\n61789,8290\n";
    let data = load_csv_from_reader(csv.as_bytes(), b',').unwrap();
    assert_eq!(data.len(), 24);

    let job = FitJob {
        test_size: 0.25,
        expect_slope: "negative".parse().unwrap(),
        predict: vec![100000.0],
        ..FitJob::new("cars.csv")
    };
    let mut log = EventLog::default();
    let report = run_on_dataset(&job, &data, &mut StdRng::seed_from_u64(8), &mut log).unwrap();

    assert!(report.slope < 0.0);
    assert!(report.slope_as_expected);
    assert_eq!(report.n_train + report.n_test, 24);
    assert_eq!(report.n_test, 6);
    assert!(report.test.is_some());
    assert!(report.train.rmse >= 0.0);
    assert_eq!(report.predictions.len(), 1);
    assert!(log
        .events
        .iter()
        .any(|e| matches!(e, ProcessEvent::Eval(EvalEvent::Metrics(EvalSet::Test, _)))));
}

#[test]
fn degenerate_input_is_not_a_panic() {
    let data = load_csv_from_reader("x,y\n2,1\n2,5\n2,9\n".as_bytes(), b',').unwrap();
    let res = run_on_dataset(
        &FitJob::new("flat.csv"),
        &data,
        &mut StdRng::seed_from_u64(0),
        &mut EventLog::default(),
    );
    assert!(matches!(
        res,
        Err(olsfit_core::pipeline::PipelineError::Fit(FitError::DegenerateX))
    ));
}
