use dmatrix::{mat, GResult, Matrix};

fn main() -> GResult<()> {
    env_logger::init();

    let a = mat![[1.0, 2.0], [3.0, 4.0]];
    let grid = vec![vec![5.0, 6.0], vec![7.0, 8.0]];
    let b = Matrix::new_from(&grid, 2, 2)?;

    println!("a + b =");
    (&a + &b)?.print();
    println!("a - b =");
    (&a - &b)?.print();
    println!("a * b =");
    (&a * &b)?.print();
    println!("a^T =");
    a.transpose().print();
    println!("2a =");
    a.scalar(2.0).print();
    println!("sum(a) = {}, avg(a) = {}", a.sum(), a.avg()?);

    let c = mat![[1.0, 2.0, 3.0]];
    if let Err(e) = &a * &c {
        log::warn!("{}", e);
    }
    Ok(())
}
